use nodal_model::{ComponentId, ComponentKind, Endpoint, Point, Quantity, WireId};
use thiserror::Error;
use unscanny::Scanner;

/// One edit of the schematic, as read from a script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Place(ComponentKind),
    Wire(Endpoint, Endpoint),
    Unwire(WireId),
    Delete(ComponentId),
    Set {
        component: ComponentId,
        key: String,
        value: Quantity,
    },
    Show,
    Netlist,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: expected {expected}")]
    MissingArgument { line: usize, expected: &'static str },

    #[error("line {line}: invalid {what} `{text}`")]
    Invalid {
        line: usize,
        what: &'static str,
        text: String,
    },

    #[error("line {line}: unexpected `{text}`")]
    TrailingInput { line: usize, text: String },
}

/// Parse a whole script. Blank lines and `#` comments are skipped, line
/// numbers start at 1.
pub fn parse_script(input: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (i, text) in input.lines().enumerate() {
        if let Some(command) = parse_line(text, i + 1)? {
            commands.push((i + 1, command));
        }
    }
    Ok(commands)
}

pub fn parse_line(text: &str, line: usize) -> Result<Option<Command>, ScriptError> {
    let mut p = LineParser::new(text, line);
    let Some(name) = p.word() else {
        return Ok(None);
    };

    let command = match name {
        "place" => {
            let kind = p.expect("a component kind")?;
            Command::Place(
                ComponentKind::from_str(kind).ok_or_else(|| p.invalid("component kind", kind))?,
            )
        }
        "wire" => {
            let a = p.expect("two endpoints")?;
            let b = p.expect("two endpoints")?;
            Command::Wire(p.endpoint(a)?, p.endpoint(b)?)
        }
        "unwire" => {
            let wire = p.expect("a wire id")?;
            Command::Unwire(p.wire_id(wire)?)
        }
        "delete" => Command::Delete(p.expect("a component id")?.into()),
        "set" => {
            let component: ComponentId = p.expect("a component id")?.into();
            let key = p.expect("a parameter name")?.to_string();
            let value = p.expect("a value")?;
            let value = value
                .parse::<f64>()
                .map_err(|_| p.invalid("value", value))?;
            let unit = p.expect("a unit")?;
            Command::Set {
                component,
                key,
                value: Quantity::new(value, unit),
            }
        }
        "show" => Command::Show,
        "netlist" => Command::Netlist,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: name.to_string(),
            });
        }
    };

    p.finish()?;
    Ok(Some(command))
}

struct LineParser<'s> {
    s: Scanner<'s>,
    line: usize,
}

impl<'s> LineParser<'s> {
    fn new(text: &'s str, line: usize) -> Self {
        Self {
            s: Scanner::new(text),
            line,
        }
    }

    fn word(&mut self) -> Option<&'s str> {
        self.s.eat_whitespace();
        let word = self.s.eat_while(|c: char| !c.is_whitespace() && c != '#');
        (!word.is_empty()).then_some(word)
    }

    fn expect(&mut self, expected: &'static str) -> Result<&'s str, ScriptError> {
        let line = self.line;
        self.word()
            .ok_or(ScriptError::MissingArgument { line, expected })
    }

    fn finish(&mut self) -> Result<(), ScriptError> {
        self.s.eat_whitespace();
        if self.s.done() || self.s.at('#') {
            Ok(())
        } else {
            Err(ScriptError::TrailingInput {
                line: self.line,
                text: self.s.after().trim_end().to_string(),
            })
        }
    }

    fn invalid(&self, what: &'static str, text: &str) -> ScriptError {
        ScriptError::Invalid {
            line: self.line,
            what,
            text: text.to_string(),
        }
    }

    fn wire_id(&self, word: &str) -> Result<WireId, ScriptError> {
        word.strip_prefix("Wire-")
            .and_then(|n| n.parse().ok())
            .map(WireId)
            .ok_or_else(|| self.invalid("wire id", word))
    }

    /// `Comp-N:idx`, `Wire-N` or `Wire-N@x,y`.
    fn endpoint(&self, word: &str) -> Result<Endpoint, ScriptError> {
        let invalid = || self.invalid("endpoint", word);

        let mut s = Scanner::new(word);
        if s.eat_if("Wire-") {
            let id = s
                .eat_while(|c: char| c.is_ascii_digit())
                .parse()
                .map_err(|_| invalid())?;
            if s.done() {
                return Ok(Endpoint::wire(WireId(id)));
            }
            if !s.eat_if('@') {
                return Err(invalid());
            }
            let (x, y) = s.after().split_once(',').ok_or_else(invalid)?;
            let x = x.parse().map_err(|_| invalid())?;
            let y = y.parse().map_err(|_| invalid())?;
            return Ok(Endpoint::wire_at(WireId(id), Point::new(x, y)));
        }

        let (component, index) = word.rsplit_once(':').ok_or_else(invalid)?;
        let index = index.parse().map_err(|_| invalid())?;
        if component.is_empty() {
            return Err(invalid());
        }
        Ok(Endpoint::terminal(component, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("place resistor", Command::Place(ComponentKind::Resistor))]
    #[case("place voltage_source", Command::Place(ComponentKind::VoltageSource))]
    #[case("  place GND  # reference", Command::Place(ComponentKind::Ground))]
    #[case(
        "wire Resistor-0:1 VoltageSource-0:0",
        Command::Wire(
            Endpoint::terminal("Resistor-0", 1),
            Endpoint::terminal("VoltageSource-0", 0)
        )
    )]
    #[case(
        "wire Wire-3@12.5,-4 Ground-0:0",
        Command::Wire(
            Endpoint::wire_at(WireId(3), Point::new(12.5, -4.0)),
            Endpoint::terminal("Ground-0", 0)
        )
    )]
    #[case(
        "wire Wire-0 Wire-1",
        Command::Wire(Endpoint::wire(WireId(0)), Endpoint::wire(WireId(1)))
    )]
    #[case("unwire Wire-12", Command::Unwire(WireId(12)))]
    #[case("delete Resistor-2", Command::Delete("Resistor-2".into()))]
    #[case(
        "set Resistor-0 R 4.7 kOhm",
        Command::Set {
            component: "Resistor-0".into(),
            key: "R".to_string(),
            value: Quantity::new(4.7, "kOhm"),
        }
    )]
    #[case("show", Command::Show)]
    #[case("netlist", Command::Netlist)]
    fn test_parse_line(#[case] text: &str, #[case] expected: Command) {
        assert_eq!(parse_line(text, 1), Ok(Some(expected)));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# place resistor")]
    fn test_blank_lines(#[case] text: &str) {
        assert_eq!(parse_line(text, 1), Ok(None));
    }

    #[rstest]
    #[case("connect a b", ScriptError::UnknownCommand { line: 4, command: "connect".to_string() })]
    #[case("place", ScriptError::MissingArgument { line: 4, expected: "a component kind" })]
    #[case("place capacitor", ScriptError::Invalid { line: 4, what: "component kind", text: "capacitor".to_string() })]
    #[case("wire Resistor-0:0", ScriptError::MissingArgument { line: 4, expected: "two endpoints" })]
    #[case("wire Resistor-0 Resistor-1:0", ScriptError::Invalid { line: 4, what: "endpoint", text: "Resistor-0".to_string() })]
    #[case("wire Wire-2@1 Resistor-1:0", ScriptError::Invalid { line: 4, what: "endpoint", text: "Wire-2@1".to_string() })]
    #[case("wire Wire-x Resistor-1:0", ScriptError::Invalid { line: 4, what: "endpoint", text: "Wire-x".to_string() })]
    #[case("unwire Resistor-0", ScriptError::Invalid { line: 4, what: "wire id", text: "Resistor-0".to_string() })]
    #[case("set Resistor-0 R ten kOhm", ScriptError::Invalid { line: 4, what: "value", text: "ten".to_string() })]
    #[case("show nodes", ScriptError::TrailingInput { line: 4, text: "nodes".to_string() })]
    fn test_parse_errors(#[case] text: &str, #[case] expected: ScriptError) {
        assert_eq!(parse_line(text, 4), Err(expected));
    }

    #[test]
    fn test_parse_script_keeps_line_numbers() {
        let script = "# divider\nplace resistor\n\nplace ground\nwire Resistor-0:0 Ground-0:0\n";

        let commands = parse_script(script).unwrap();

        let lines: Vec<usize> = commands.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, [2, 4, 5]);
    }

    #[test]
    fn test_parse_script_stops_at_first_error() {
        let err = parse_script("place resistor\nplace\nbogus").unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected a component kind");
    }
}

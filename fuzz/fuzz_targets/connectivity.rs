#![no_main]

use libfuzzer_sys::fuzz_target;
use nodal_model::{ComponentKind, ConnectivityModel, Endpoint, ModelConfig, WireId};

fn endpoint(model: &ConnectivityModel, byte: u8) -> Endpoint {
    let wires: Vec<WireId> = model.wires().map(|w| w.id).collect();
    if byte & 0x80 != 0 && !wires.is_empty() {
        return Endpoint::wire(wires[byte as usize % wires.len()]);
    }
    let components: Vec<_> = model.components().collect();
    let component = components[(byte >> 1) as usize % components.len()];
    // out of range indexes on purpose, the model has to reject them
    Endpoint::terminal(component.id.clone(), (byte & 1) as usize + (byte >> 6 & 1) as usize)
}

fuzz_target!(|data: &[u8]| {
    let mut model = ConnectivityModel::with_config(ModelConfig {
        record_events: false,
        ..Default::default()
    });
    model.add_component(ComponentKind::Ground);

    for op in data.chunks_exact(3) {
        let before = model.clone();
        let result = match op[0] % 8 {
            0 => {
                model.add_component(ComponentKind::ALL[op[1] as usize % 3]);
                Ok(())
            }
            1 => model.disconnect(WireId(op[1] as usize)),
            2 => {
                let ids: Vec<_> = model.components().map(|c| c.id.clone()).collect();
                if ids.len() > 1 {
                    model.remove_component(&ids[op[1] as usize % ids.len()])
                } else {
                    Ok(())
                }
            }
            _ => {
                let a = endpoint(&model, op[1]);
                let b = endpoint(&model, op[2]);
                model.connect(a, b).map(|_| ())
            }
        };
        if result.is_err() {
            assert_eq!(model, before);
        }
        model.check_consistency().unwrap();
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

use hookscope::prelude::*;

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

fn unary() -> Signature {
    Signature::new(vec![ValueKind::I32], ValueKind::I32)
}

fn offset(name: &str, by: i32) -> Function {
    Function::new(name, unary(), move |args| match args {
        [Value::I32(v)] => Ok(Value::I32(v.wrapping_add(by))),
        _ => Ok(Value::I32(0)),
    })
}

// Every byte pair is one operation against a registry with two slots. A
// shadow map tracks which names exist and whether they are installed.
fuzz_target!(|data: &[u8]| {
    let slots = [
        FunctionSlot::new(offset("base0", 0)),
        FunctionSlot::new(offset("base1", 1000)),
    ];
    let mut registry = HookRegistry::new();
    let mut model: BTreeMap<&str, bool> = BTreeMap::new();

    for pair in data.chunks_exact(2) {
        let name = NAMES[usize::from(pair[1] & 0b11)];
        let slot = &slots[usize::from((pair[1] >> 2) & 1)];

        match pair[0] % 7 {
            0 => {
                let added = registry.add(
                    slot.clone(),
                    offset("replacement", i32::from(pair[1])),
                    name,
                );
                assert_eq!(added.is_ok(), !model.contains_key(name));
                model.entry(name).or_insert(false);
            }
            1 => match registry.install(name) {
                Ok(()) => {
                    model.insert(name, true);
                }
                Err(Error::NotFound(_)) => assert!(!model.contains_key(name)),
                Err(e) => panic!("unexpected install error: {e}"),
            },
            2 => match registry.uninstall(name) {
                Ok(()) => {
                    model.insert(name, false);
                }
                Err(Error::NotFound(_)) => assert!(!model.contains_key(name)),
                // Stacked hooks refuse to restore out of order
                Err(Error::UninstallFailed(_)) => assert_eq!(model.get(name), Some(&true)),
                Err(e) => panic!("unexpected uninstall error: {e}"),
            },
            3 => match registry.remove(name) {
                Ok(()) => {
                    model.remove(name);
                }
                Err(Error::Lookup(_)) => assert!(!model.contains_key(name)),
                Err(Error::UninstallFailed(_)) => assert_eq!(model.get(name), Some(&true)),
                Err(e) => panic!("unexpected remove error: {e}"),
            },
            4 => {
                let _ = registry.install_all();
            }
            5 => {
                let _ = registry.uninstall_all();
            }
            _ => match registry.call_original(name, &[Value::I32(1)]) {
                Ok(value) => assert!(value.as_i32().is_some()),
                Err(Error::Lookup(_)) => assert!(!model.contains_key(name)),
                Err(e) => panic!("unexpected call_original error: {e}"),
            },
        }

        // Bulk operations update entries the shadow map cannot predict
        if pair[0] % 7 == 4 || pair[0] % 7 == 5 {
            for (entry_name, installed) in model.iter_mut() {
                if let Some(entry) = registry.get(entry_name) {
                    *installed = entry.is_installed();
                }
            }
        }

        assert_eq!(registry.len(), model.len());
        assert!(registry.names().eq(model.keys().copied()));
        for (entry_name, installed) in &model {
            assert_eq!(registry.is_installed(entry_name).ok(), Some(*installed));
        }
    }

    // Dispatch through every slot still works whatever the hook stack looks like
    for slot in &slots {
        assert!(slot.call(&[Value::I32(1)]).is_ok());
    }
});

//! Hook strategy integration tests.
//!
//! Exercises the built-in [`SlotHook`] / [`TableHook`] strategies directly and
//! a caller-provided [`Hook`] implementation through the registry, with a
//! `tracing` subscriber installed so the lifecycle events are rendered.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Once,
};

use hookscope::prelude::*;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hookscope=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

fn greet_signature() -> Signature {
    Signature::new(vec![ValueKind::Str], ValueKind::Str)
}

fn greeter(name: &str, greeting: &'static str) -> Function {
    Function::new(name, greet_signature(), move |args| {
        let who = args[0].as_str().unwrap_or_default();
        Ok(Value::from(format!("{greeting}, {who}")))
    })
}

/// Counts calls to the original without redirecting anything.
struct Probe {
    slot: FunctionSlot,
    active: bool,
    calls: Arc<AtomicUsize>,
}

impl Hook for Probe {
    fn try_install(&mut self) -> bool {
        self.active = true;
        true
    }

    fn try_uninstall(&mut self) -> bool {
        self.active = false;
        true
    }

    fn is_installed(&self) -> bool {
        self.active
    }

    fn invoke_original(&self, args: &[Value]) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.slot.call(args)
    }
}

#[test]
fn test_slot_hook_lifecycle() -> Result<()> {
    init_tracing();

    let slot = FunctionSlot::new(greeter("hello", "Hello"));
    let mut hook = SlotHook::new(slot.clone(), greeter("hi", "Hi"))?;
    let who = [Value::from("world")];

    assert!(!hook.is_installed());
    assert_eq!(hook.invoke_original(&who)?, Value::from("Hello, world"));

    assert!(hook.try_install());
    assert!(hook.try_install());
    assert_eq!(slot.call(&who)?, Value::from("Hi, world"));
    assert_eq!(hook.invoke_original(&who)?, Value::from("Hello, world"));
    assert_eq!(hook.original().map(Function::name), Some("hello"));

    assert!(hook.try_uninstall());
    assert!(hook.try_uninstall());
    assert_eq!(slot.call(&who)?, Value::from("Hello, world"));
    assert!(hook.original().is_none());

    Ok(())
}

#[test]
fn test_slot_hook_refuses_foreign_restore() -> Result<()> {
    init_tracing();

    let slot = FunctionSlot::new(greeter("hello", "Hello"));
    let mut hook = SlotHook::new(slot.clone(), greeter("hi", "Hi"))?;
    assert!(hook.try_install());

    // Someone else rewrote the slot behind the hook's back
    slot.swap(greeter("hey", "Hey"))?;
    assert!(!hook.try_uninstall());
    assert!(hook.is_installed());
    assert_eq!(
        slot.call(&[Value::from("you")])?,
        Value::from("Hey, you")
    );

    Ok(())
}

#[test]
fn test_table_hook_only_touches_its_entry() -> Result<()> {
    init_tracing();

    let table = FunctionTable::new(
        "greetings",
        vec![greeter("hello", "Hello"), greeter("bye", "Bye")],
    );
    let mut hook = TableHook::new(table.entry(0)?, greeter("yo", "Yo"))?;
    let who = [Value::from("Ada")];

    assert!(hook.try_install());
    assert_eq!(table.call(0, &who)?, Value::from("Yo, Ada"));
    assert_eq!(table.call(1, &who)?, Value::from("Bye, Ada"));
    assert_eq!(hook.site().index(), 0);

    assert!(hook.try_uninstall());
    assert_eq!(table.call(0, &who)?, Value::from("Hello, Ada"));

    Ok(())
}

#[test]
fn test_return_kind_is_validated() -> Result<()> {
    init_tracing();

    let slot = FunctionSlot::new(greeter("hello", "Hello"));
    let liar = Function::new("liar", greet_signature(), |_| Ok(Value::I32(0)));
    let mut registry = HookRegistry::new();
    registry.add(slot.clone(), liar, "liar")?;
    registry.install("liar")?;

    assert!(matches!(
        slot.call(&[Value::from("x")]),
        Err(Error::ReturnType {
            expected: ValueKind::Str,
            found: ValueKind::I32
        })
    ));
    // The original is still well-behaved
    assert_eq!(
        registry.call_original("liar", &[Value::from("x")])?,
        Value::from("Hello, x")
    );

    Ok(())
}

#[test]
fn test_custom_hook_in_shared_registry() -> Result<()> {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let slot = FunctionSlot::new(greeter("hello", "Hello"));
    let registry = SharedRegistry::with_config(RegistryConfig::strict());
    registry.add_hook(
        "probe",
        Probe {
            slot: slot.clone(),
            active: false,
            calls: calls.clone(),
        },
    )?;

    assert!(matches!(
        registry.add_hook(
            "probe",
            Probe {
                slot,
                active: false,
                calls: calls.clone(),
            },
        ),
        Err(Error::DuplicateName(name)) if name == "probe"
    ));

    registry.install_all()?;
    assert!(registry.is_installed("probe")?);
    assert_eq!(
        registry.call_original("probe", &[Value::from("Grace")])?,
        Value::from("Hello, Grace")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    registry.clear()?;
    assert!(registry.is_empty()?);
    assert!(matches!(
        registry.call_original("probe", &[]),
        Err(Error::NotFound(_))
    ));

    Ok(())
}

#[test]
fn test_shared_registry_handles_see_same_entries() -> Result<()> {
    init_tracing();

    let registry = SharedRegistry::from(HookRegistry::new());
    let other = registry.clone();
    let slot = FunctionSlot::new(greeter("hello", "Hello"));

    registry.add(slot, greeter("hi", "Hi"), "hi")?;
    assert!(other.contains("hi")?);
    assert_eq!(other.names()?, vec!["hi".to_string()]);

    other.remove("hi")?;
    assert_eq!(registry.len()?, 0);

    let installed = registry.with(|inner| inner.installed().count())?;
    assert_eq!(installed, 0);

    Ok(())
}

//! Benchmarks for hook dispatch and registry lifecycle operations.
//!
//! Measures:
//! - Direct calls through an unhooked slot (baseline)
//! - Calls through an installed redirection
//! - `call_original` through the registry
//! - Install / uninstall round trips
//! - Bulk `install_all` / `uninstall_all` over many hooks

extern crate hookscope;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hookscope::prelude::*;
use std::hint::black_box;

fn binary() -> Signature {
    Signature::new(vec![ValueKind::I32, ValueKind::I32], ValueKind::I32)
}

fn add(name: &str) -> Function {
    Function::new(name, binary(), |args| match args {
        [Value::I32(a), Value::I32(b)] => Ok(Value::I32(a.wrapping_add(*b))),
        _ => Ok(Value::I32(0)),
    })
}

fn mul(name: &str) -> Function {
    Function::new(name, binary(), |args| match args {
        [Value::I32(a), Value::I32(b)] => Ok(Value::I32(a.wrapping_mul(*b))),
        _ => Ok(Value::I32(0)),
    })
}

/// Benchmark a call through a slot with no hook installed.
fn bench_slot_call_unhooked(c: &mut Criterion) {
    let slot = FunctionSlot::new(add("add"));
    let args = [Value::I32(3), Value::I32(4)];

    c.bench_function("slot_call_unhooked", |b| {
        b.iter(|| black_box(slot.call(black_box(&args)).unwrap()));
    });
}

/// Benchmark a call through a slot redirected to a replacement.
fn bench_slot_call_hooked(c: &mut Criterion) {
    let slot = FunctionSlot::new(add("add"));
    let mut registry = HookRegistry::new();
    registry.add(slot.clone(), mul("mul"), "mul").unwrap();
    registry.install("mul").unwrap();
    let args = [Value::I32(3), Value::I32(4)];

    c.bench_function("slot_call_hooked", |b| {
        b.iter(|| black_box(slot.call(black_box(&args)).unwrap()));
    });
}

/// Benchmark invoking the original through the registry by name.
fn bench_call_original(c: &mut Criterion) {
    let slot = FunctionSlot::new(add("add"));
    let mut registry = HookRegistry::new();
    registry.add(slot, mul("mul"), "mul").unwrap();
    registry.install("mul").unwrap();
    let args = [Value::I32(3), Value::I32(4)];

    c.bench_function("registry_call_original", |b| {
        b.iter(|| black_box(registry.call_original(black_box("mul"), &args).unwrap()));
    });
}

/// Benchmark a single install followed by an uninstall.
fn bench_install_uninstall(c: &mut Criterion) {
    let slot = FunctionSlot::new(add("add"));
    let mut registry = HookRegistry::new();
    registry.add(slot, mul("mul"), "mul").unwrap();

    c.bench_function("registry_install_uninstall", |b| {
        b.iter(|| {
            registry.install(black_box("mul")).unwrap();
            registry.uninstall(black_box("mul")).unwrap();
        });
    });
}

/// Benchmark bulk install and uninstall of 256 table hooks.
fn bench_bulk_lifecycle(c: &mut Criterion) {
    const ENTRIES: usize = 256;

    c.bench_function("registry_bulk_lifecycle_256", |b| {
        b.iter_batched(
            || {
                let table = FunctionTable::new(
                    "ops",
                    (0..ENTRIES).map(|i| add(&format!("add_{i}"))).collect(),
                );
                let mut registry = HookRegistry::new();
                for index in 0..ENTRIES {
                    registry
                        .add(
                            table.entry(index).unwrap(),
                            mul("mul"),
                            format!("hook_{index:03}"),
                        )
                        .unwrap();
                }
                registry
            },
            |mut registry| {
                registry.install_all().unwrap();
                registry.uninstall_all().unwrap();
                black_box(registry)
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark `call_original` through the shared, mutex-guarded registry.
fn bench_shared_call_original(c: &mut Criterion) {
    let slot = FunctionSlot::new(add("add"));
    let registry = SharedRegistry::new();
    registry.add(slot, mul("mul"), "mul").unwrap();
    registry.install("mul").unwrap();
    let args = [Value::I32(3), Value::I32(4)];

    c.bench_function("shared_call_original", |b| {
        b.iter(|| black_box(registry.call_original(black_box("mul"), &args).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_slot_call_unhooked,
    bench_slot_call_hooked,
    bench_call_original,
    bench_install_uninstall,
    bench_bulk_lifecycle,
    bench_shared_call_original,
);
criterion_main!(benches);

//! # Fuel-Chain Settlement Benchmarks
//!
//! | Path | What is measured |
//! |------|------------------|
//! | transfer | Crude transfer with two-payment settlement and atomic commit |
//! | deliverFuel | Plan construction over N orders |
//! | queryAssetByRange | Range scan over N records |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fc_01_ledger_gateway::InMemoryKVStore;
use fc_02_supply_chain::{invoke, SupplyChainService};
use fc_tests::fixtures::{
    add_fuel_order, args, deliver_crude, deliver_fuel, initialized, must, refine, transfer,
};

fn with_crudes(count: usize) -> SupplyChainService<InMemoryKVStore> {
    let mut service = initialized(InMemoryKVStore::new());
    for i in 1..=count {
        must(
            &mut service,
            "deliverCrude",
            &deliver_crude(&format!("Crude{}", i), 1000.0, 50),
        );
    }
    service
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("fc-02-transfer");

    group.bench_function("crude_transfer_with_settlement", |b| {
        b.iter_batched(
            || with_crudes(1),
            |mut service| {
                black_box(invoke(
                    &mut service,
                    "transfer",
                    &transfer("Crude1", "org3", 250, None),
                ))
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_deliver_fuel(c: &mut Criterion) {
    let mut group = c.benchmark_group("fc-02-deliver-fuel");

    for size in [1usize, 10, 50] {
        let order_ids: Vec<String> = (1..=size).map(|i| format!("FuelOrder{}", i)).collect();
        let refs: Vec<&str> = order_ids.iter().map(String::as_str).collect();
        let plan_args = deliver_fuel("Plan1", &refs);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("plan_orders", size), &plan_args, |b, plan_args| {
            b.iter_batched(
                || {
                    let mut service = with_crudes(1);
                    must(&mut service, "refine", &refine("Fuel1", "Crude1"));
                    for id in &order_ids {
                        must(
                            &mut service,
                            "addFuelOrder",
                            &add_fuel_order(id, "Fuel1", 200.0, 30),
                        );
                    }
                    service
                },
                |mut service| black_box(invoke(&mut service, "deliverFuel", plan_args)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_range_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("fc-02-range-query");

    for size in [10usize, 100, 500] {
        let mut service = with_crudes(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("crude_range", size), |b| {
            b.iter(|| black_box(invoke(&mut service, "queryAssetByRange", &args(&["Crude"]))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transfer, bench_deliver_fuel, bench_range_query);
criterion_main!(benches);

//! P-256 scalar multiplication benchmarks: variable-base vs. the masked
//! fixed-base table for the generator.

use criterion::{criterion_group, criterion_main, Criterion};
use ecws_core::{EcContext, EcPoint};
use hex_literal::hex;

const SCALAR: [u8; 32] =
    hex!("3573f43930f14407df6473420e703705f62f4c25f2d06a932e3769bdad298ff8");

fn bench_scalar(c: &mut Criterion) {
    let ctx = EcContext::p256();

    c.bench_function("variable-base scalar mul", |b| {
        b.iter(|| {
            let mut p = EcPoint::generator(&ctx);
            p.scalar(&SCALAR, 0).unwrap();
        })
    });

    c.bench_function("fixed-base scalar mul (G)", |b| {
        b.iter(|| {
            ctx.scalar_g(&SCALAR, 0).unwrap();
        })
    });
}

criterion_group!(benches, bench_scalar);
criterion_main!(benches);

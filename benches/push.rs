#[macro_use]
extern crate criterion;

use std::collections::VecDeque;

use criterion::{black_box, Criterion};

use flex_seq::{Alloc, Back, Front, Inline, Middle, SeqConfig, Sequence, Small};

const COUNT: usize = 1000;

fn push_back_all<C: SeqConfig>() -> usize {
    let mut seq = Sequence::<usize, C>::new();
    for value in 0..COUNT {
        seq.push_back(black_box(value));
    }
    seq.len()
}

fn push_front_all<C: SeqConfig>() -> usize {
    let mut seq = Sequence::<usize, C>::new();
    for value in 0..COUNT {
        seq.push_front(black_box(value));
    }
    seq.len()
}

fn push_compare(c: &mut Criterion) {
    c.bench_function(&format!("vec push {} values", COUNT), |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            for value in 0..COUNT {
                buf.push(black_box(value));
            }
            buf.len()
        });
    });

    c.bench_function(&format!("vecdeque push_back {} values", COUNT), |b| {
        b.iter(|| {
            let mut buf = VecDeque::new();
            for value in 0..COUNT {
                buf.push_back(black_box(value));
            }
            buf.len()
        });
    });

    c.bench_function(&format!("vecdeque push_front {} values", COUNT), |b| {
        b.iter(|| {
            let mut buf = VecDeque::new();
            for value in 0..COUNT {
                buf.push_front(black_box(value));
            }
            buf.len()
        });
    });

    c.bench_function(&format!("seq front push_back {} values", COUNT), |b| {
        b.iter(push_back_all::<Alloc<Front>>);
    });

    c.bench_function(&format!("seq middle push_back {} values", COUNT), |b| {
        b.iter(push_back_all::<Alloc<Middle>>);
    });

    c.bench_function(&format!("seq middle push_front {} values", COUNT), |b| {
        b.iter(push_front_all::<Alloc<Middle>>);
    });

    c.bench_function(&format!("seq back push_front {} values", COUNT), |b| {
        b.iter(push_front_all::<Alloc<Back>>);
    });

    c.bench_function(&format!("seq inline push_back {} values", COUNT), |b| {
        b.iter(push_back_all::<Inline<COUNT>>);
    });

    c.bench_function(
        &format!("seq inline back push_front {} values", COUNT),
        |b| {
            b.iter(push_front_all::<Inline<COUNT, Back>>);
        },
    );

    c.bench_function(&format!("seq small(32) push_back {} values", COUNT), |b| {
        b.iter(push_back_all::<Small<32>>);
    });
}

criterion_group!(benches, push_compare);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gist_core::diff::{align_with_reordering, opcodes};
use gist_core::text::{keys, tokenize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SENTENCE: &str = "On 20 September 2002 the respondent Mr Brown was registered as proprietor of a substantial piece of rough, undeveloped land lying to the north of the village, which had formerly been used for grazing.";

fn generate_words(words: usize) -> String {
    let base: Vec<&str> = SENTENCE.split_whitespace().collect();
    (0..words).map(|i| base[i % base.len()]).collect::<Vec<_>>().join(" ")
}

/// Drop roughly `drop_pct` percent of the words, keeping order.
fn drop_words(text: &str, drop_pct: u32, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    text.split_whitespace()
        .filter(|_| rng.gen_range(0..100) >= drop_pct)
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_tokenize(c: &mut Criterion) {
    let text = generate_words(1000);
    c.bench_function("tokenize_1000_words", |b| {
        b.iter(|| black_box(tokenize(black_box(&text))))
    });
}

fn bench_alignment(c: &mut Criterion) {
    for &words in &[30usize, 120] {
        let parent = generate_words(words);
        let child = drop_words(&parent, 30, 7);
        let (a, b) = (keys(&parent), keys(&child));
        c.bench_function(&format!("align_with_reordering_{words}_words"), |bench| {
            bench.iter(|| black_box(align_with_reordering(black_box(&a), black_box(&b))))
        });
        c.bench_function(&format!("opcodes_{words}_words"), |bench| {
            bench.iter(|| black_box(opcodes(black_box(&a), black_box(&b))))
        });
    }
}

criterion_group!(benches, bench_tokenize, bench_alignment);
criterion_main!(benches);

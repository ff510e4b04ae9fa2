use paperscan_crawl::{Vocabulary, match_terms};

const WORDS: &[&str] = &[
    "we", "propose", "a", "neural", "model", "for", "machine", "translation", "that", "uses",
    "attention", "over", "the", "source", "sentence", "and", "improves", "bleu", "on", "wmt",
];

/// Pseudo-paper of `n` words with hyphenated line breaks every 12 words
fn synthetic_text(n: usize) -> String {
    let mut text = String::with_capacity(n * 8);
    for i in 0..n {
        text.push_str(WORDS[(i * 7 + i / 3) % WORDS.len()]);
        text.push_str(if i % 12 == 11 { "-\n" } else { " " });
    }
    text
}

fn vocabulary(terms: usize) -> Vocabulary {
    let mut raw: Vec<String> = vec![
        "neural machine translation".into(),
        "attention".into(),
        "bleu".into(),
        "machine translation".into(),
    ];
    raw.extend((0..terms).map(|i| format!("term{i} phrase{}", i % 5)));
    Vocabulary::new(raw).unwrap()
}

#[divan::bench(args = [1_000, 10_000, 50_000])]
fn match_words(bencher: divan::Bencher, words: usize) {
    let text = synthetic_text(words);
    let vocab = vocabulary(50);
    bencher.bench(|| match_terms(divan::black_box(&text), &vocab));
}

#[divan::bench(args = [10, 100, 1_000])]
fn match_vocabulary_size(bencher: divan::Bencher, terms: usize) {
    let text = synthetic_text(10_000);
    let vocab = vocabulary(terms);
    bencher.bench(|| match_terms(divan::black_box(&text), &vocab));
}

fn main() {
    divan::main();
}

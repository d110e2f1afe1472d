use deptriples::codes::{label, pos};
use deptriples::{Analysis, BuildOptions, Token, build_document, find_verb_triples};
use divan::AllocProfiler;
use divan::{Bencher, black_box};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

/// `n` copies of "The cat chased the mouse ." as one document
fn synthetic_analysis(n: usize) -> Analysis {
    let mut analysis = Analysis {
        language: "en".to_string(),
        ..Analysis::default()
    };
    for s in 0..n {
        let o = s * 6;
        analysis.tokens.extend([
            Token::new(o, "The", "the", pos::DET, o + 1, label::DET),
            Token::new(o + 1, "cat", "cat", pos::NOUN, o + 2, label::NSUBJ),
            Token::new(o + 2, "chased", "chase", pos::VERB, o + 2, label::ROOT),
            Token::new(o + 3, "the", "the", pos::DET, o + 4, label::DET),
            Token::new(o + 4, "mouse", "mouse", pos::NOUN, o + 2, label::DOBJ),
            Token::new(o + 5, ".", ".", pos::PUNCT, o + 2, label::P),
        ]);
        analysis.sentences.push("The cat chased the mouse.".to_string());
    }
    analysis
}

#[divan::bench(args = [10, 1000])]
fn build(bencher: Bencher, n: usize) {
    let analysis = synthetic_analysis(n);
    bencher.bench_local(|| {
        black_box(build_document(black_box(&analysis), &BuildOptions::default()))
    });
}

#[divan::bench(args = [10, 1000])]
fn verb_triples(bencher: Bencher, n: usize) {
    let doc = build_document(&synthetic_analysis(n), &BuildOptions::default());
    bencher.bench_local(|| {
        let count = black_box(find_verb_triples(black_box(&doc), true, true).count());
        black_box(count);
    });
}

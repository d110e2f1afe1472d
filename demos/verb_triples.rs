//! Extract subject-verb-object triples from a CoNLL-U file
//!
//! Run with: cargo run --example verb_triples [file.conllu[.gz]]

use deptriples::{
    BuildOptions, Vocabulary, build_document, find_verb_triples, parse_conllu, read_conllu_file,
};

const SAMPLE: &str = "# text = The cat chased the mouse.
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tcat\tcat\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\tchased\tchase\tVERB\tVBD\t_\t0\troot\t_\t_
4\tthe\tthe\tDET\tDT\t_\t5\tdet\t_\t_
5\tmouse\tmouse\tNOUN\tNN\t_\t3\tdobj\t_\tSpaceAfter=No
6\t.\t.\tPUNCT\t.\t_\t3\tp\t_\t_
";

fn main() {
    let analysis = match std::env::args().nth(1) {
        Some(path) => read_conllu_file(&path),
        None => parse_conllu(SAMPLE),
    };
    let analysis = match analysis {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let doc = build_document(&analysis, &BuildOptions::default());
    let vocabulary = Vocabulary::standard();
    println!("{}", doc.describe(false, Some(&vocabulary)));

    for (subject, verb, object) in find_verb_triples(&doc, true, true) {
        println!("({}, {}, {})", subject.content, verb.content, object.content);
    }
}

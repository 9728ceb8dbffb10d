//! Build script to generate embedded topic packs
//!
//! Reads every `data/*.txt` file (one `WORD|clue` pair per line) and
//! generates Rust source code with a const table of packs keyed by topic.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let mut packs: Vec<PathBuf> = fs::read_dir("data")
        .unwrap_or_else(|e| panic!("Failed to read data directory: {e}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    packs.sort();

    generate_topic_packs(&packs, &Path::new(&out_dir).join("topics.rs"));

    // Rebuild if packs are added, removed or edited
    println!("cargo:rerun-if-changed=data");
    for pack in &packs {
        println!("cargo:rerun-if-changed={}", pack.display());
    }
}

fn generate_topic_packs(packs: &[PathBuf], output_path: &Path) {
    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated topic packs").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Built-in `(topic, [(word, clue)])` packs, sorted by topic").unwrap();
    writeln!(output, "pub const TOPIC_PACKS: &[(&str, &[(&str, &str)])] = &[").unwrap();

    for pack in packs {
        let topic = pack
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_else(|| panic!("Bad pack name {}", pack.display()));
        let content = fs::read_to_string(pack)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", pack.display()));

        writeln!(output, "    ({topic:?}, &[").unwrap();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (word, clue) = line
                .split_once('|')
                .unwrap_or_else(|| panic!("Missing '|' in {}: {line}", pack.display()));
            writeln!(output, "        ({:?}, {:?}),", word.trim(), clue.trim()).unwrap();
        }
        writeln!(output, "    ]),").unwrap();
    }

    writeln!(output, "];").unwrap();
}

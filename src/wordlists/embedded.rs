//! Embedded topic packs
//!
//! Packs compiled into the binary at build time from `data/*.txt`.

// Include generated packs from build script
include!(concat!(env!("OUT_DIR"), "/topics.rs"));

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const NESTEST_GOLD_LOG_PATH: &str = "./tests/data/nestest.log";
const NESTEST_ROM_PATH: &str = "./tests/data/nestest.nes";

/// Read the nestest ROM, or None when the image is not checked out
pub fn load_nestest_rom() -> Option<Vec<u8>> {
    let mut file = File::open(Path::new(NESTEST_ROM_PATH)).ok()?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).ok()?;
    Some(buf)
}

/// Read the known-good log, or None when it is not checked out
pub fn load_gold_standard_log() -> Option<Vec<String>> {
    let file = File::open(Path::new(NESTEST_GOLD_LOG_PATH)).ok()?;
    let file = BufReader::new(file);
    Some(
        file.lines()
            .map(|line| String::from(line.unwrap().trim_end()))
            .collect(),
    )
}

//! Helpers for parsing iNES ROM files
//!
//! The core itself never touches a ROM; this feeds the reference test
//! driver, which copies PRG data into the flat address space.

use thiserror::Error;

/// The leading bytes of every iNES image: "NES" followed by an EOF byte
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];
const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;

/// PRG-ROM comes in 16 KiB chunks
pub const PRG_CHUNK_LEN: usize = 0x4000;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("failed to read the image")]
    Io(#[from] std::io::Error),
    #[error("not an iNES image (bad magic)")]
    BadMagic,
    #[error("iNES image truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

bitflags! {
    pub struct InesFlags6: u8 {
        /// The hardwired nametable mirroring mode
        const MIRRORING = 0x01;
        /// Whether this ROM contains a battery-backed RAM
        const HAS_PERSISTENT_MEMORY = 0x02;
        /// Whether a 512-byte trainer sits between the header and PRG data
        const HAS_TRAINER = 0x04;
        /// Whether to use 4-screen VRAM instead of mirroring
        const USE_FOUR_SCREEN_VRAM = 0x08;
        /// The lower nibble of the iNES mapper number
        const LOWER_MAPPER_NIBBLE = 0xF0;
    }
}

/// A parsed iNES image, borrowing the PRG data out of the source buffer
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Ines<'a> {
    /// The number of 16 KiB PRG chunks. Never 0.
    pub prg_chunks: usize,
    /// The number of 8 KiB CHR chunks
    pub chr_chunks: usize,
    /// Mapper, mirroring, battery, trainer
    pub flags_6: InesFlags6,
    prg: &'a [u8],
}

impl<'a> Ines<'a> {
    /// Borrow the nth 16 KiB PRG chunk
    pub fn prg_chunk(&self, n: usize) -> &'a [u8] {
        &self.prg[n * PRG_CHUNK_LEN..(n + 1) * PRG_CHUNK_LEN]
    }
}

/// Parse an iNES buffer, skipping the trainer when one is present
pub fn parse(buf: &[u8]) -> Result<Ines<'_>, RomError> {
    if buf.len() < HEADER_LEN {
        return Err(RomError::Truncated {
            expected: HEADER_LEN,
            actual: buf.len(),
        });
    }
    if buf[0..4] != INES_MAGIC {
        return Err(RomError::BadMagic);
    }
    let prg_chunks = if buf[4] == 0 { 1 } else { buf[4] as usize };
    let chr_chunks = buf[5] as usize;
    let flags_6 = InesFlags6::from_bits_truncate(buf[6]);

    let prg_start = if flags_6.contains(InesFlags6::HAS_TRAINER) {
        HEADER_LEN + TRAINER_LEN
    } else {
        HEADER_LEN
    };
    let prg_end = prg_start + prg_chunks * PRG_CHUNK_LEN;
    if buf.len() < prg_end {
        return Err(RomError::Truncated {
            expected: prg_end,
            actual: buf.len(),
        });
    }

    Ok(Ines {
        prg_chunks,
        chr_chunks,
        flags_6,
        prg: &buf[prg_start..prg_end],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_header(flags_6: u8, prg_chunks: u8, body_len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN + body_len];
        buf[0..4].copy_from_slice(&INES_MAGIC);
        buf[4] = prg_chunks;
        buf[5] = 1;
        buf[6] = flags_6;
        buf
    }

    #[test]
    fn should_parse_header() {
        let buf = image_with_header(0x02, 1, PRG_CHUNK_LEN);
        let rom = parse(&buf).expect("Failed to parse a well-formed image");
        assert_eq!(rom.prg_chunks, 1, "PRG size mismatch");
        assert_eq!(rom.chr_chunks, 1, "CHR size mismatch");
        assert!(
            rom.flags_6.contains(InesFlags6::HAS_PERSISTENT_MEMORY),
            "Flags6 mismatch"
        );
        assert_eq!(rom.prg_chunk(0).len(), PRG_CHUNK_LEN);
    }

    #[test]
    fn should_skip_trainer() {
        let mut buf = image_with_header(0x04, 1, TRAINER_LEN + PRG_CHUNK_LEN);
        buf[HEADER_LEN + TRAINER_LEN] = 0xA9;
        let rom = parse(&buf).expect("Failed to parse a trainer image");
        assert_eq!(rom.prg_chunk(0)[0], 0xA9, "PRG should start after the trainer");
    }

    #[test]
    fn should_reject_bad_magic() {
        let buf = vec![0u8; HEADER_LEN + PRG_CHUNK_LEN];
        assert!(matches!(parse(&buf), Err(RomError::BadMagic)));
    }

    #[test]
    fn should_reject_truncated_prg() {
        let buf = image_with_header(0x00, 2, PRG_CHUNK_LEN);
        assert!(matches!(parse(&buf), Err(RomError::Truncated { .. })));
    }
}

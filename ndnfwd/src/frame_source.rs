//! Reference [`FrameSource`] for local testing and benchmarking: a simple
//! length-prefixed frame log, not a production capture path (attaching to
//! a real NIC/XDP program is out of scope for this crate).
//!
//! Record layout: `u32 frame_len (LE) | u32 ingress_ifindex (LE) | frame_len bytes`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndnfwd_lib::FrameSource;

pub struct FileFrameSource {
    reader: BufReader<File>,
}

impl FileFrameSource {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
        })
    }
}

impl FrameSource for FileFrameSource {
    fn next_frame(&mut self) -> Option<(Vec<u8>, u32)> {
        let mut header = [0u8; 8];
        self.reader.read_exact(&mut header).ok()?;
        let frame_len = u32::from_le_bytes(header[0..4].try_into().ok()?) as usize;
        let ingress_ifindex = u32::from_le_bytes(header[4..8].try_into().ok()?);

        let mut frame = vec![0u8; frame_len];
        self.reader.read_exact(&mut frame).ok()?;
        Some((frame, ingress_ifindex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_back_written_records() {
        let mut path = std::env::temp_dir();
        path.push(format!("ndnfwd-frame-source-test-{}.bin", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            let frame = [0xAAu8, 0xBB, 0xCC];
            f.write_all(&(frame.len() as u32).to_le_bytes()).unwrap();
            f.write_all(&7u32.to_le_bytes()).unwrap();
            f.write_all(&frame).unwrap();
        }

        let mut source = FileFrameSource::open(&path).unwrap();
        let (frame, ifindex) = source.next_frame().unwrap();
        assert_eq!(frame, vec![0xAA, 0xBB, 0xCC]);
        assert_eq!(ifindex, 7);
        assert!(source.next_frame().is_none());

        let _ = std::fs::remove_file(&path);
    }
}

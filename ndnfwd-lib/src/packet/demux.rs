//! L2/L3/L4 demultiplexing.
//!
//! Every helper here takes the raw frame slice plus an offset and returns
//! `Option`/`Result` rather than panicking; bounds are checked before each
//! read, exactly like the TLV codec. Multi-byte integer fields in IP/UDP
//! are network (big-endian) byte order.

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_NDN_DIRECT: u16 = 0x8624;
pub const ETH_HEADER_LEN: usize = 14;

pub const IP_PROTO_UDP: u8 = 17;
pub const NDN_UDP_PORT: u16 = 6363;

pub const NDN_TYPE_NACK: u64 = 0x03;
pub const NDN_TYPE_INTEREST: u64 = 0x05;
pub const NDN_TYPE_DATA: u64 = 0x06;
pub const NDN_TYPE_NAME: u64 = 0x07;
pub const NDN_TYPE_NAME_COMPONENT: u64 = 0x08;
pub const NDN_TYPE_NONCE: u64 = 0x0A;
pub const NDN_TYPE_INTEREST_LIFETIME: u64 = 0x0C;
pub const NDN_TYPE_META_INFO: u64 = 0x14;
pub const NDN_TYPE_CONTENT: u64 = 0x15;
pub const NDN_TYPE_SIGNATURE_INFO: u64 = 0x16;
pub const NDN_TYPE_SIGNATURE_VALUE: u64 = 0x17;

/// Outcome of walking the Ethernet/IPv4/UDP headers: either an NDN payload
/// was located, or the frame should be passed through untouched.
pub enum DemuxResult {
    /// Offset of the first byte of the NDN TLV stream within `frame`.
    Ndn { payload_offset: usize },
    /// Not an NDN frame (wrong ethertype, wrong protocol/port, or a
    /// recognised-but-unsupported transport like TCP/6363 or WS/9696).
    NotNdn,
}

fn read_u16_be(buf: &[u8], offset: usize) -> Option<u16> {
    let b = buf.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

fn read_u8(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

/// Walks the Ethernet header and, for IPv4, the IPv4+UDP headers, looking
/// for an NDN-over-UDP or NDN-direct payload. Returns `NotNdn` (never an
/// error) for anything that doesn't match — including truncated frames,
/// per the "every bounds failure just means PASS" discipline at this layer.
pub fn demux(frame: &[u8]) -> DemuxResult {
    let Some(ethertype) = read_u16_be(frame, 12) else {
        return DemuxResult::NotNdn;
    };

    match ethertype {
        ETHERTYPE_NDN_DIRECT => DemuxResult::Ndn {
            payload_offset: ETH_HEADER_LEN,
        },
        ETHERTYPE_IPV4 => demux_ipv4(frame),
        _ => DemuxResult::NotNdn,
    }
}

fn demux_ipv4(frame: &[u8]) -> DemuxResult {
    let ip_start = ETH_HEADER_LEN;
    let Some(ver_ihl) = read_u8(frame, ip_start) else {
        return DemuxResult::NotNdn;
    };
    let ihl_words = (ver_ihl & 0x0F) as usize;
    if ihl_words < 5 {
        return DemuxResult::NotNdn;
    }
    let ip_header_len = ihl_words * 4;

    let Some(protocol) = read_u8(frame, ip_start + 9) else {
        return DemuxResult::NotNdn;
    };
    if protocol != IP_PROTO_UDP {
        return DemuxResult::NotNdn;
    }

    let udp_start = ip_start + ip_header_len;
    let (Some(src_port), Some(dst_port)) = (
        read_u16_be(frame, udp_start),
        read_u16_be(frame, udp_start + 2),
    ) else {
        return DemuxResult::NotNdn;
    };

    if src_port != NDN_UDP_PORT && dst_port != NDN_UDP_PORT {
        return DemuxResult::NotNdn;
    }

    const UDP_HEADER_LEN: usize = 8;
    DemuxResult::Ndn {
        payload_offset: udp_start + UDP_HEADER_LEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth_frame(ethertype: u16, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![0u8; ETH_HEADER_LEN];
        frame[12..14].copy_from_slice(&ethertype.to_be_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    #[test]
    fn ndn_direct_ethertype_is_recognised() {
        let frame = eth_frame(ETHERTYPE_NDN_DIRECT, &[0x05, 0x00]);
        match demux(&frame) {
            DemuxResult::Ndn { payload_offset } => assert_eq!(payload_offset, ETH_HEADER_LEN),
            DemuxResult::NotNdn => panic!("expected NDN payload"),
        }
    }

    #[test]
    fn unrecognised_ethertype_passes() {
        let frame = eth_frame(0x86DD /* IPv6 */, &[]);
        assert!(matches!(demux(&frame), DemuxResult::NotNdn));
    }

    #[test]
    fn ipv4_udp_6363_is_recognised() {
        let mut frame = eth_frame(ETHERTYPE_IPV4, &[]);
        // IPv4 header, 20 bytes, ihl=5
        frame.extend_from_slice(&[0x45, 0, 0, 0, 0, 0, 0, 0, 64, IP_PROTO_UDP, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        // UDP header: src=12345, dst=6363, len, checksum
        frame.extend_from_slice(&12345u16.to_be_bytes());
        frame.extend_from_slice(&NDN_UDP_PORT.to_be_bytes());
        frame.extend_from_slice(&[0, 8, 0, 0]);
        frame.extend_from_slice(&[0x05, 0x00]);

        match demux(&frame) {
            DemuxResult::Ndn { payload_offset } => {
                assert_eq!(&frame[payload_offset..], &[0x05, 0x00]);
            }
            DemuxResult::NotNdn => panic!("expected NDN payload"),
        }
    }

    #[test]
    fn ipv4_tcp_is_passed_through() {
        let mut frame = eth_frame(ETHERTYPE_IPV4, &[]);
        frame.extend_from_slice(&[0x45, 0, 0, 0, 0, 0, 0, 0, 64, 6 /* TCP */, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(demux(&frame), DemuxResult::NotNdn));
    }

    #[test]
    fn truncated_frame_passes_rather_than_panics() {
        let frame = [0u8; 4];
        assert!(matches!(demux(&frame), DemuxResult::NotNdn));
    }
}

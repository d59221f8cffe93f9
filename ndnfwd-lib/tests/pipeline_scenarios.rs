//! End-to-end scenarios against literal hex NDN payloads, each wrapped in
//! an Ethernet II / NDN-direct (ethertype 0x8624) frame.

use std::sync::Arc;

use ndnfwd_lib::config::Config;
use ndnfwd_lib::{Clock, FakeClock, Router, Verdict};

const ETHERTYPE_NDN_DIRECT: u16 = 0x8624;

fn eth_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; 14];
    frame[12..14].copy_from_slice(&ETHERTYPE_NDN_DIRECT.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

const INTEREST_FOO_BA: [u8; 16] = [
    0x05, 0x0B, 0x07, 0x09, 0x08, 0x03, 0x66, 0x6F, 0x6F, 0x08, 0x02, 0x62, 0x61, 0x0A, 0x01, 0x01,
];
const DATA_UNSOLICITED: [u8; 15] = [
    0x06, 0x0D, 0x07, 0x09, 0x08, 0x03, 0x66, 0x6F, 0x6F, 0x08, 0x02, 0x62, 0x61, 0x15, 0x00,
];
const DATA_SATISFIES_FOO_BA: [u8; 19] = [
    0x06, 0x11, 0x07, 0x09, 0x08, 0x03, 0x66, 0x6F, 0x6F, 0x08, 0x02, 0x62, 0x61, 0x15, 0x04, 0xDE, 0xAD, 0xBE, 0xEF,
];

fn router() -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(0));
    Router::new(Config::default(), clock, 1)
}

#[test]
fn interest_with_cs_miss_and_no_fib_route_passes() {
    let r = router();
    let verdict = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_eq!(verdict, Verdict::Pass);
    let snap = r.metrics_snapshot();
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::InterestsRecv), 1);
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::CacheMisses), 1);
    assert_eq!(r.pit_len(), 1);
}

#[test]
fn interest_matching_cached_content_hits_and_passes() {
    // Populate the CS by first satisfying the Interest with Data (the
    // pipeline's own cache-insert path), then redeliver the Interest.
    let r = router();
    let _ = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3); // populates PIT
    let _ = r.process_frame(&eth_frame(&DATA_SATISFIES_FOO_BA), 3); // caches content
    let verdict = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_eq!(verdict, Verdict::Pass);
    let snap = r.metrics_snapshot();
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::CacheHits), 1);
}

#[test]
fn retransmitted_interest_within_duplicate_window_is_dropped() {
    let clock = Arc::new(FakeClock::new(0));
    let r = Router::new(Config::default(), clock.clone(), 1);
    let first = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    clock.advance_ns(100_000_000); // 100ms
    let second = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_eq!(first, Verdict::Pass);
    assert_eq!(second, Verdict::Drop);
    let snap = r.metrics_snapshot();
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::Drops), 1);
    assert_eq!(r.pit_len(), 1, "refreshed, not duplicated");
}

#[test]
fn interest_with_fib_route_is_redirected_to_egress() {
    let r = router();
    let name_value: [u8; 9] = [0x08, 0x03, 0x66, 0x6F, 0x6F, 0x08, 0x02, 0x62, 0x61];
    let hash = ndnfwd_lib::hash_name(&name_value, ndnfwd_lib::HashAlgorithm::default(), 64);
    r.fib_upsert(hash, 7);
    let verdict = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_eq!(verdict, Verdict::Redirect(7));
    let snap = r.metrics_snapshot();
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::Redirects), 1);
}

#[test]
fn data_with_no_matching_pit_entry_is_dropped() {
    let r = router();
    let verdict = r.process_frame(&eth_frame(&DATA_UNSOLICITED), 3);
    assert_eq!(verdict, Verdict::Drop);
    let snap = r.metrics_snapshot();
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::Drops), 1);
}

#[test]
fn data_satisfying_pending_interest_is_cached_and_consumed() {
    let r = router();
    let first = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_eq!(first, Verdict::Pass);
    assert_eq!(r.pit_len(), 1);

    let data_verdict = r.process_frame(&eth_frame(&DATA_SATISFIES_FOO_BA), 3);
    assert_eq!(data_verdict, Verdict::Pass);
    assert_eq!(r.pit_len(), 0, "PIT entry must be removed once Data resolves it");

    let snap = r.metrics_snapshot();
    assert_eq!(snap.get(ndnfwd_lib::telemetry::MetricId::CacheInserts), 1);

    let replay = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_eq!(replay, Verdict::Pass);
    let snap2 = r.metrics_snapshot();
    assert_eq!(snap2.get(ndnfwd_lib::telemetry::MetricId::CacheHits), 1);
}

#[test]
fn fib_never_redirects_back_to_ingress_interface() {
    let r = router();
    let name_value: [u8; 9] = [0x08, 0x03, 0x66, 0x6F, 0x6F, 0x08, 0x02, 0x62, 0x61];
    let hash = ndnfwd_lib::hash_name(&name_value, ndnfwd_lib::HashAlgorithm::default(), 64);
    r.fib_upsert(hash, 3);
    let verdict = r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3);
    assert_ne!(verdict, Verdict::Redirect(3));
}

#[test]
fn non_ndn_ethertype_touches_no_counter() {
    let r = router();
    let mut frame = vec![0u8; 14];
    frame[12..14].copy_from_slice(&0x86DDu16.to_be_bytes()); // IPv6
    let verdict = r.process_frame(&frame, 3);
    assert_eq!(verdict, Verdict::Pass);
    let snap = r.metrics_snapshot();
    assert_eq!(snap.values, [0u64; 9]);
}

#[test]
fn nonce_window_boundary_999ms_drops_1001ms_forwards() {
    let clock = Arc::new(FakeClock::new(0));
    let r = Router::new(Config::default(), clock.clone(), 1);
    assert_eq!(r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3), Verdict::Pass);
    clock.advance_ns(999_000_000);
    assert_eq!(r.process_frame(&eth_frame(&INTEREST_FOO_BA), 3), Verdict::Drop);

    let clock2 = Arc::new(FakeClock::new(0));
    let r2 = Router::new(Config::default(), clock2.clone(), 1);
    assert_eq!(r2.process_frame(&eth_frame(&INTEREST_FOO_BA), 3), Verdict::Pass);
    clock2.advance_ns(1_001_000_000);
    assert_eq!(r2.process_frame(&eth_frame(&INTEREST_FOO_BA), 3), Verdict::Pass);
}

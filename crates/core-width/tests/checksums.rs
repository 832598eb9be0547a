//! Whole-code-space width digests, table-backed and LUT-backed.

use core_width::{Condition, LUT_LEN, MAX_CODE_POINT, Resolver};
use sha2::{Digest, Sha256};

struct Case {
    name: &'static str,
    condition: Condition,
    want_digest: &'static str,
    /// Count of code points with width 0, 1, 2.
    want_histogram: [usize; 3],
}

const EA_NO: &str = "a98d2a32d1b3407a3037636a279a73c3d549f6a9fbc8e92bee91dd991acdf0e1";

const CASES: &[Case] = &[
    Case {
        name: "ea-no",
        condition: Condition::new(false, true),
        want_digest: EA_NO,
        want_histogram: [2698, 928895, 182519],
    },
    Case {
        name: "ea-yes",
        condition: Condition::new(true, true),
        want_digest: "cac3940e576bfd67d8312b762ddee862caf388d30a137359a8d9b07ba09166de",
        want_histogram: [2698, 790269, 321145],
    },
    Case {
        name: "ea-yes-nse",
        condition: Condition::new(true, false),
        want_digest: "159b6d9fb22ad78b9e757a208117e59ac449e0a45eda483cedb26e6c6c7b6f68",
        want_histogram: [2698, 788002, 323412],
    },
    Case {
        name: "ea-no-nse",
        condition: Condition::new(false, false),
        want_digest: EA_NO,
        want_histogram: [2698, 928895, 182519],
    },
];

fn width_array(resolver: &Resolver) -> Vec<u8> {
    let mut buf = vec![0u8; LUT_LEN];
    for r in 0..=MAX_CODE_POINT {
        buf[r as usize] = resolver.width(r);
    }
    buf
}

fn histogram(buf: &[u8]) -> [usize; 3] {
    let mut h = [0usize; 3];
    for &w in buf {
        h[w as usize] += 1;
    }
    h
}

fn check(case: &Case, buf: &[u8], backing: &str) {
    let digest: String = Sha256::digest(buf).iter().map(|b| format!("{b:02x}")).collect();
    assert_eq!(
        histogram(buf),
        case.want_histogram,
        "{} ({backing}) histogram",
        case.name
    );
    assert!(
        digest == case.want_digest,
        "\nwidth checksum = {} ({backing})\nsha256 {digest}\nwant   {}",
        case.name,
        case.want_digest
    );
}

#[test]
fn width_checksums_tables_then_lut() {
    for case in CASES {
        let mut resolver = Resolver::new(case.condition);
        let tables = width_array(&resolver);
        check(case, &tables, "tables");

        resolver.build_lut();
        let lut = width_array(&resolver);
        check(case, &lut, "lut");
        assert!(tables == lut, "{}: lut diverges from tables", case.name);
    }
}

#[test]
fn lut_bytes_are_the_width_array() {
    let c = Condition::new(true, true);
    let resolver = Resolver::new(c).with_lut();
    let lut = core_width::Lut::build(c);
    assert!(lut.as_bytes() == width_array(&resolver).as_slice());
}

//! Offline validation of the generated interval tables.
//!
//! The engine trusts table ordering at runtime; these tests are where it is
//! actually enforced.

use core_width::tables::{
    AMBIGUOUS, COMBINING, DOUBLEWIDTH, EMOJI, NARROW, NEUTRAL, NONPRINT, PRIVATE,
};
use core_width::{LUT_LEN, MAX_CODE_POINT, Table};
use sha2::{Digest, Sha256};

struct TableInfo {
    table: &'static Table,
    name: &'static str,
    want_count: u32,
    want_digest: &'static str,
}

static TABLES: &[TableInfo] = &[
    TableInfo {
        table: &PRIVATE,
        name: "private",
        want_count: 137468,
        want_digest: "a4a641206dc8c5de80bd9f03515a54a706a5a4904c7684dc6a33d65c967a51b2",
    },
    TableInfo {
        table: &NONPRINT,
        name: "nonprint",
        want_count: 2143,
        want_digest: "288904683eb225e7c4c0bd3ee481b53e8dace404ec31d443afdbc4d13729fe95",
    },
    TableInfo {
        table: &COMBINING,
        name: "combining",
        want_count: 555,
        want_digest: "bf1cafd5aa2c3734b07a609ffd4d981cd3184e322a1b261431ff746031305cb4",
    },
    TableInfo {
        table: &DOUBLEWIDTH,
        name: "doublewidth",
        want_count: 182521,
        want_digest: "88f214dc0a0c31eb2bc083d1e4b3ad58f720634c6708be8b61f10446a8967b37",
    },
    TableInfo {
        table: &AMBIGUOUS,
        name: "ambiguous",
        want_count: 138739,
        want_digest: "d05e339a10f296de6547ff3d6c5aee32f627f6555477afebd4a3b7e3cf74c9e3",
    },
    TableInfo {
        table: &EMOJI,
        name: "emoji",
        want_count: 3535,
        want_digest: "9ec17351601d49c535658de8d129c1d0ccda2e620669fc39a2faaee7dedcef6d",
    },
    TableInfo {
        table: &NARROW,
        name: "narrow",
        want_count: 111,
        want_digest: "fa897699c5e3cd9141c638d539331b0bdd508b874e22996c5e929767d455fc5a",
    },
    TableInfo {
        table: &NEUTRAL,
        name: "neutral",
        want_count: 28382,
        want_digest: "1cbccfec7db52c7bd0e6c97c26229278a221b68afc0ca7830f1ba7e86c9b6dbc",
    },
];

fn sha256_hex(buf: &[u8]) -> String {
    Sha256::digest(buf).iter().map(|b| format!("{b:02x}")).collect()
}

/// Membership bitmap built by walking the intervals directly, no search.
fn scan_bitmap(table: &Table) -> Vec<u8> {
    let mut buf = vec![0u8; LUT_LEN];
    for iv in table.iter() {
        buf[iv.first as usize..=iv.last as usize].fill(1);
    }
    buf
}

#[test]
fn entries_are_valid_intervals() {
    for ti in TABLES {
        for (i, iv) in ti.table.iter().enumerate() {
            assert!(
                iv.first <= iv.last && iv.last <= MAX_CODE_POINT,
                "table {} index {i}: invalid interval {iv:?}",
                ti.name
            );
        }
    }
}

#[test]
fn tables_sorted_and_compact() {
    for ti in TABLES {
        for (i, pair) in ti.table.intervals().windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.first < b.first,
                "table {} not sorted at index {i}: {a:?} {b:?}",
                ti.name
            );
            assert!(
                a.last + 1 < b.first,
                "table {} not compact at index {i}: {a:?} {b:?}",
                ti.name
            );
        }
    }
}

#[test]
fn table_checksums() {
    for ti in TABLES {
        let buf = scan_bitmap(ti.table);
        let count = buf.iter().filter(|&&b| b == 1).count() as u32;
        let digest = sha256_hex(&buf);
        assert_eq!(count, ti.table.code_point_count(), "table {}", ti.name);
        assert!(
            count == ti.want_count && digest == ti.want_digest,
            "\ntable = {}\nn = {count} want {}\nsha256 {digest}\nwant   {}",
            ti.name,
            ti.want_count,
            ti.want_digest
        );
    }
}

#[test]
fn binary_search_matches_scan_everywhere() {
    for ti in TABLES {
        let buf = scan_bitmap(ti.table);
        for r in 0..=MAX_CODE_POINT {
            let want = buf[r as usize] == 1;
            if ti.table.contains(r) != want {
                panic!("table {}: contains({r:#X}) != {want}", ti.name);
            }
        }
    }
}

#[test]
fn classes_are_disjoint() {
    // East Asian Width assigns exactly one class per code point.
    let mut seen = vec![0u8; LUT_LEN];
    for table in [&DOUBLEWIDTH, &AMBIGUOUS, &NARROW, &NEUTRAL] {
        for (r, hit) in scan_bitmap(table).into_iter().enumerate() {
            seen[r] += hit;
        }
    }
    let overlap = seen.iter().position(|&n| n > 1);
    assert_eq!(overlap, None, "code point in two width classes");
}

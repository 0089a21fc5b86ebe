use std::collections::HashMap;

use crate::lookup::LookupEntry;
use crate::tariff::{HierarchyBuilder, TariffRow};

fn row(code: &str, desc: &str) -> TariffRow {
    TariffRow::new(code, desc, "", "")
}

fn build(rows: &[TariffRow]) -> HashMap<String, LookupEntry> {
    HierarchyBuilder::build(rows)
}

fn path<'a>(map: &'a HashMap<String, LookupEntry>, code: &str) -> &'a str {
    map.get(code)
        .map(|e| e.hierarchy_path.as_str())
        .unwrap_or_else(|| panic!("code {code} missing from lookup"))
}

/// Chapter 20 excerpt with a run of flat administrative subcodes.
fn vegetables_section() -> Vec<TariffRow> {
    vec![
        row("2005", "Other vegetables prepared or preserved otherwise than by vinegar:"),
        row("200510", "- Homogenised vegetables :"),
        row("20051012", "-- In airtight containers"),
        row("200510120001", "Baby food, carrots"),
        row("200510120002", "Baby food, mixed"),
        row("200520", "- Potatoes :"),
        row("20052010", "-- Chips"),
        row("2006", "Fruit, nuts, fruit-peel preserved by sugar"),
        row("200600", "- Glacé cherries"),
    ]
}

#[test]
fn test_path_segments_match_level() {
    let rows = vec![
        row("84", "Nuclear reactors, boilers, machinery"),
        row("8482", "- Ball or roller bearings"),
        row("848210", "-- Ball bearings"),
        row("84821010", "--- Of a bore not exceeding 50 mm"),
    ];
    let map = build(&rows);

    for (r, level) in rows.iter().zip(0..) {
        let segments = path(&map, &r.code).split(" > ").collect::<Vec<_>>();
        assert_eq!(segments.len(), level + 1, "{}", r.code);
        let own = r.description_en.trim_start_matches(['-', ' ']);
        assert_eq!(*segments.last().unwrap(), own);
    }
}

#[test]
fn test_genuine_heading_resets_deeper_levels() {
    let rows = vec![
        row("0101", "Live horses, asses, mules"),
        row("010121", "- Pure-bred breeding animals"),
        row("01012100", "-- Horses"),
        row("0102", "Live bovine animals"),
        row("01029000", "-- Other"),
    ];
    let map = build(&rows);

    assert_eq!(path(&map, "0102"), "Live bovine animals");
    // level 1 from the previous heading is gone
    assert_eq!(path(&map, "01029000"), "Live bovine animals > Other");
}

#[test]
fn test_subcode_variant_keeps_heading_path() {
    let rows = vec![
        row("1234", "Heading"),
        row("1234.56.78.001", "Administrative variant"),
        row("123410", "- Child"),
    ];
    let map = build(&rows);

    assert_eq!(path(&map, "1234.56.78.001"), "Heading");
    assert_eq!(path(&map, "123410"), "Heading > Child");
}

#[test]
fn test_subcode_variant_uses_all_active_levels() {
    let map = build(&vegetables_section());

    let expected = "Other vegetables prepared or preserved otherwise than by vinegar > \
                    Homogenised vegetables > In airtight containers";
    assert_eq!(path(&map, "200510120001"), expected);
    assert_eq!(path(&map, "200510120002"), expected);

    // the subcodes did not disturb the section for the rows after them
    assert_eq!(
        path(&map, "20052010"),
        "Other vegetables prepared or preserved otherwise than by vinegar > Potatoes > Chips"
    );
}

#[test]
fn test_subcode_variant_keeps_its_own_duty_and_procedures() {
    let rows = vec![
        TariffRow::new("2005", "Vegetables", "5%", "P1"),
        TariffRow::new("200510120001", "Baby food", "Exempted", "P7, P9"),
    ];
    let map = build(&rows);

    let entry = &map["200510120001"];
    assert_eq!(entry.hierarchy_path, "Vegetables");
    assert_eq!(entry.duty_rate, "Exempted");
    assert_eq!(entry.procedures, "P7, P9");
}

#[test]
fn test_new_prefix_at_level_zero_is_a_heading() {
    let map = build(&vegetables_section());

    assert_eq!(path(&map, "2006"), "Fruit, nuts, fruit-peel preserved by sugar");
    assert_eq!(
        path(&map, "200600"),
        "Fruit, nuts, fruit-peel preserved by sugar > Glacé cherries"
    );
}

#[test]
fn test_stale_levels_are_cleared() {
    let rows = vec![
        row("0101", "A"),
        row("010110", "- B"),
        row("01011010", "-- C"),
        row("010120", "- D"),
        row("01012010", "-- E"),
    ];
    let map = build(&rows);

    assert_eq!(path(&map, "010120"), "A > D");
    assert_eq!(path(&map, "01012010"), "A > D > E");
}

#[test]
fn test_build_is_idempotent() {
    let rows = vegetables_section();
    assert_eq!(build(&rows), build(&rows));
}

#[test]
fn test_malformed_rows_do_not_affect_state() {
    let rows = vec![
        row("0101", "Horses"),
        row("", "- Orphan without code"),
        row("010190", ""),
        row("010191", "  -  "),
        row("0102", "- Ponies"),
    ];
    let map = build(&rows);

    assert_eq!(map.len(), 2);
    assert!(!map.contains_key(""));
    assert!(!map.contains_key("010190"));
    assert!(!map.contains_key("010191"));
    assert_eq!(path(&map, "0102"), "Horses > Ponies");
}

#[test]
fn test_first_row_below_root() {
    // no heading seen yet; the row still gets its own text
    let map = build(&[row("010121", "-- Pure-bred")]);
    assert_eq!(path(&map, "010121"), "Pure-bred");
}

#[test]
fn test_skipped_level_joins_present_levels() {
    let map = build(&[row("0101", "Horses"), row("01012100", "--- Deep")]);
    assert_eq!(path(&map, "01012100"), "Horses > Deep");
}

#[test]
fn test_duplicate_code_keeps_later_row() {
    let rows = vec![
        TariffRow::new("0101", "Horses", "5%", ""),
        TariffRow::new("010110", "- Breeding", "5%", ""),
        TariffRow::new("010110", "- Breeding", "0%", "P2"),
    ];
    let map = build(&rows);

    assert_eq!(map["010110"].duty_rate, "0%");
    assert_eq!(map["010110"].procedures, "P2");
}

#[test]
fn test_whitespace_led_dashes_do_not_leak_into_paths() {
    let rows = vec![
        row("0101", "Horses"),
        row("010110", "\t-- Tabbed"),
        row("010120", "\u{a0}- Nbsp"),
        row("010130", "- \t- Mixed"),
    ];
    let map = build(&rows);

    assert_eq!(path(&map, "010110"), "Horses > Tabbed");
    assert_eq!(path(&map, "010120"), "Horses > Nbsp");
    assert_eq!(path(&map, "010130"), "Horses > Nbsp > Mixed");
}

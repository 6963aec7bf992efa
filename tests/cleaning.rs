use tabula_cleaner::clean::{clean_str, clean_table, clean_text, normalize_header};
use tabula_cleaner::model::{CellValue, Column, FillPolicy, Table};

#[test]
fn missing_and_blank_cells_take_the_fill_value() {
    for fill in [FillPolicy::NotAvailable, FillPolicy::Blank] {
        assert_eq!(clean_text(&CellValue::Missing, fill), fill.value());
        assert_eq!(clean_text(&CellValue::Number(f64::NAN), fill), fill.value());
        assert_eq!(clean_str("", fill), fill.value());
        assert_eq!(clean_str("  \t \r\n ", fill), fill.value());
    }
}

#[test]
fn numbers_are_rendered_as_text() {
    let fill = FillPolicy::NotAvailable;
    assert_eq!(clean_text(&CellValue::Number(42.0), fill), "42");
    assert_eq!(clean_text(&CellValue::Number(3.5), fill), "3.5");
    assert_eq!(clean_text(&CellValue::Number(-0.25), fill), "-0.25");
}

#[test]
fn currency_and_markup_symbols_are_removed() {
    let cleaned = clean_str("+1 $20 ₹30 #4", FillPolicy::NotAvailable);
    assert_eq!(cleaned, "1 20 30 4");
    assert_eq!(clean_str("a+b$c₹d#e", FillPolicy::NotAvailable), "abcde");
}

#[test]
fn tags_are_removed_non_greedily() {
    assert_eq!(
        clean_str("Hello<b>World</b>", FillPolicy::NotAvailable),
        "HelloWorld"
    );
    assert_eq!(
        clean_str("a <span class=\"x\">b</span> c", FillPolicy::NotAvailable),
        "a b c"
    );
}

#[test]
fn cells_emptied_by_cleaning_stay_empty() {
    assert_eq!(clean_str("<br/>", FillPolicy::NotAvailable), "");
    assert_eq!(clean_str("$#", FillPolicy::NotAvailable), "");
}

#[test]
fn line_breaks_collapse_to_single_spaces() {
    let fill = FillPolicy::NotAvailable;
    assert_eq!(clean_str("line1\r\n\r\nline2", fill), "line1 line2");
    assert_eq!(clean_str("\nfirst\nsecond\n", fill), "first second");
    assert_eq!(clean_str("a\\r\\nb", fill), "a b");
    assert_eq!(clean_str("\\nstart and end\\r", fill), "start and end");
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(
        clean_str("  too   many\t\tspaces  ", FillPolicy::Blank),
        "too many spaces"
    );
}

#[test]
fn information_separators_count_as_whitespace() {
    assert_eq!(clean_str("a\u{1f}b", FillPolicy::NotAvailable), "a b");
    assert_eq!(clean_str("\u{1c}x\u{1c}", FillPolicy::NotAvailable), "x");
    assert_eq!(clean_str("\u{1d}\u{1e}", FillPolicy::NotAvailable), "N/A");
    assert_eq!(normalize_header("\u{1f}Total Cost\u{1c}"), "total_cost");
}

#[test]
fn mojibake_is_repaired_and_other_text_kept() {
    let fill = FillPolicy::NotAvailable;
    assert_eq!(clean_str("CafÃ©", fill), "Café");
    assert_eq!(clean_str("café", fill), "café");
    assert_eq!(clean_str("₹ 500", fill), "500");
}

#[test]
fn cleaning_is_idempotent_on_plain_text() {
    let fill = FillPolicy::NotAvailable;
    for input in ["Hello World", "Café au lait", "john@example.com", "a-b_c 12.5", "N/A"] {
        let once = clean_str(input, fill);
        assert_eq!(clean_str(&once, fill), once, "input {input:?}");
    }
}

#[test]
fn headers_replace_each_literal_space() {
    assert_eq!(normalize_header(" Full  Name "), "full__name");
    assert_eq!(normalize_header("First Name"), "first_name");
    assert_eq!(normalize_header("Email "), "email");
    assert_eq!(normalize_header("Tab\tName"), "tab\tname");
}

#[test]
fn clean_table_normalizes_headers_and_cells() {
    let table = Table {
        columns: vec![
            Column {
                name: " Customer Name".into(),
                cells: vec!["  Ann ".into(), CellValue::Missing],
            },
            Column {
                name: "customer name".into(),
                cells: vec![12.0.into(), "<i>x</i>".into()],
            },
        ],
    };

    let cleaned = clean_table(table, FillPolicy::Blank);

    assert_eq!(
        cleaned.column_names(),
        vec!["customer_name", "customer_name.1"]
    );
    assert_eq!(cleaned.row(0), Some(vec!["Ann", "12"]));
    assert_eq!(cleaned.row(1), Some(vec!["", "x"]));
    assert_eq!(cleaned.row(2), None);
}

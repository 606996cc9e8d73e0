#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), "₱"), "₱1,234.56");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-150), "₱"), "-₱150.00");
}

#[test]
fn test_format_amount_other_symbol() {
    assert_eq!(format_amount(dec!(4850), "$"), "$4,850.00");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(10000000), "₱"), "₱10,000,000.00");
}

#[test]
fn test_format_amount_rounds() {
    assert_eq!(format_amount(dec!(1.005), "₱"), "₱1.00");
    assert_eq!(format_amount(dec!(2.5), "₱"), "₱2.50");
}

#[test]
fn test_format_amount_negative_rounding_to_zero() {
    assert_eq!(format_amount(dec!(-0.001), "₱"), "₱0.00");
}

#[test]
fn test_format_signed() {
    assert_eq!(format_signed(dec!(5000), "₱"), "+₱5,000.00");
    assert_eq!(format_signed(dec!(-150), "₱"), "-₱150.00");
    assert_eq!(format_signed(dec!(0), "₱"), "₱0.00");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_bounds() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(50.0, 4), "[██░░]");
    assert_eq!(progress_bar(100.0, 4), "[████]");
    assert_eq!(progress_bar(150.0, 4), "[████]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_and_top_bottom() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_index_after_shrink() {
    let (mut index, mut scroll) = (5, 5);
    clamp_index(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));
    clamp_index(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}

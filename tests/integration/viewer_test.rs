//! Integration tests for the event list surface.
//!
//! These tests are implemented in:
//! `crates/procmon-tui/tests/message_list_test.rs`
//!
//! Covered scenarios:
//! - `first_frame_shows_placeholders_even_with_data`: Loading state until mounted
//! - `example_record_renders_one_row`: Ordinal, time, owner badge, tag badge and chips
//! - `exactly_n_rows_for_n_records`: One row per record, no extras
//! - `ordinal_is_positional_not_sequence_index`: First column counts from zero
//! - `empty_stream_shows_message_and_no_rows`: Empty state message
//! - `absent_stream_is_empty`: Missing stream behaves like an empty one
//! - `loading_after_mount_swaps_back_to_placeholders`: Placeholders win over data
//! - `severe_rows_are_emphasized`: Danger background on severe rows only
//! - `malformed_records_render_without_panicking`: Normalized wire records
//! - `enabling_follow_fires_exactly_one_scroll`: One scroll per trigger
//! - `appending_rearms_only_while_following`: Appends re-arm follow mode
//! - `filter_change_rearms_follow`: Filter token changes re-arm follow mode
//! - `follow_scroll_brings_newest_row_into_view`: Smooth scroll settles at the end
//! - `unmount_during_delay_cancels_scroll`: No scroll after teardown
//! - `chip_tooltip_appears_after_show_delay`: Debounced chip tooltips
//! - `owner_tooltip_resolves_through_directory`: Owner tooltips from the directory
//! - `click_selects_the_full_record`: Click hands the record to the callback
//!
//! Feed parsing (JSON array, JSON lines, instance files) is covered in
//! `crates/procmon-cli/src/feed.rs`.

mod integration_watcher;
mod unit_filter_and_feed;
mod unit_sanitizer;

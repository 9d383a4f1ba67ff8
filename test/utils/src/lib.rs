use std::env;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        return Ok(buf.len());
    }

    fn flush(&mut self) -> io::Result<()> {
        return Ok(());
    }
}

/// Runs `f` with a JSON subscriber installed and returns everything it logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || return writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    return String::from_utf8_lossy(&bytes).to_string();
}

/// A well formed recommendation as returned by the retrieval chain, with the
/// required keys shuffled and surrounded by blank lines.
pub fn product_fixture() -> &'static str {
    return r#"
name: Aurora ANC Wireless Earbuds

id: 10042
price: ¥12,800
stock_status: in stock
category: Audio
maker: Lumen Acoustics
score: 4.6
review_number: 238
file_name: aurora_anc.jpg
description: Note: works with USB-C chargers. Up to 30 hours of playback.
recommended_people: Commuters who want long battery life and clear sound.

"#;
}

/// Same product with the stock status replaced.
pub fn product_fixture_with_stock(stock_status: &str) -> String {
    return product_fixture().replace(
        "stock_status: in stock",
        &format!("stock_status: {stock_status}"),
    );
}

/// Same product with every line starting with `key: ` removed.
pub fn product_fixture_without(key: &str) -> String {
    let prefix = format!("{key}: ");
    return product_fixture()
        .lines()
        .filter(|line| return !line.starts_with(&prefix))
        .collect::<Vec<&str>>()
        .join("\n");
}

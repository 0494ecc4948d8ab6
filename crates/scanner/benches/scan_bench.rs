use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use scanner::{Scanner, StringCursor, TokenKind, TokenSet, SERIALIZATION_BUFFER_SIZE};

const RAW_TEXT_BYTES: usize = 64 * 1024;
const NEAR_CLOSERS: usize = 2_000;

/// Raw-text body built almost entirely out of near-sentinels and lone braces,
/// the worst case for the sentinel-matching loop.
fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    while body.len() < bytes {
        body.push_str("</scri");
        body.push('{');
        body.push_str("pt x");
    }
    body.push_str("</script>");
    body
}

/// Verbatim body made of closers that miss the recorded suffix until the end.
fn make_verbatim_adversarial(near_closers: usize) -> String {
    let mut body = String::with_capacity(near_closers * 24 + 32);
    for _ in 0..near_closers {
        body.push_str("{% endverbatim nope %}");
    }
    body.push_str("{% endverbatim key %}");
    body
}

fn scan_once(scanner: &mut Scanner, input: &str, valid: &TokenSet) -> Option<TokenKind> {
    let mut cursor = StringCursor::new(input);
    scanner.scan(&mut cursor, valid)
}

fn bench_raw_text_adversarial(c: &mut Criterion) {
    let body = make_rawtext_adversarial(RAW_TEXT_BYTES);
    let start = TokenSet::of(&[TokenKind::ScriptStartTagName]);
    let raw = TokenSet::of(&[TokenKind::RawText]);

    let mut scanner = Scanner::new();
    assert_eq!(
        scan_once(&mut scanner, "script>", &start),
        Some(TokenKind::ScriptStartTagName)
    );

    c.bench_function("bench_raw_text_adversarial", |b| {
        b.iter(|| {
            let token = scan_once(&mut scanner, black_box(&body), &raw);
            black_box(token);
        });
    });
}

fn bench_verbatim_content_adversarial(c: &mut Criterion) {
    let body = make_verbatim_adversarial(NEAR_CLOSERS);
    let start = TokenSet::of(&[TokenKind::VerbatimStart]);
    let content = TokenSet::of(&[TokenKind::VerbatimBlockContent]);

    let mut armed = Scanner::new();
    assert_eq!(
        scan_once(&mut armed, " key %}", &start),
        Some(TokenKind::VerbatimStart)
    );

    c.bench_function("bench_verbatim_content_adversarial", |b| {
        // The content scan clears the suffix on success, so each iteration
        // starts from a freshly armed clone.
        b.iter_batched(
            || armed.clone(),
            |mut scanner| {
                let token = scan_once(&mut scanner, black_box(&body), &content);
                black_box(token);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_state_round_trip(c: &mut Criterion) {
    let start = TokenSet::of(&[
        TokenKind::HtmlStartTagName,
        TokenKind::ForeignStartTagName,
    ]);
    let mut scanner = Scanner::new();
    for _ in 0..24 {
        scan_once(&mut scanner, "div>", &start);
    }
    scan_once(&mut scanner, "svg ", &start);
    for _ in 0..24 {
        scan_once(&mut scanner, "customElement ", &start);
    }

    c.bench_function("bench_state_round_trip", |b| {
        b.iter(|| {
            let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
            let written = scanner.serialize(&mut buffer);
            let mut restored = Scanner::new();
            restored.deserialize(&buffer[..written]);
            black_box(restored.depth());
        });
    });
}

criterion_group!(
    benches,
    bench_raw_text_adversarial,
    bench_verbatim_content_adversarial,
    bench_state_round_trip
);
criterion_main!(benches);

// Criterion benchmarks for the fishbowl-common wire layer
//
// Run benchmarks with:
//   cargo bench -p fishbowl-common

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fishbowl_common::transport::frame::{encode_frame, read_frame, DEFAULT_MAX_FRAME_LEN};
use fishbowl_common::xml::element::{element_with, text_element};
use fishbowl_common::{Envelope, Ticket};
use std::io::Cursor;

fn sample_request() -> Envelope {
    let mut envelope = Envelope::request(element_with(
        "CustomerGetRq",
        [text_element("Name", "Acme Corporation")],
    ));
    envelope.attach_ticket(Some(&Ticket::with_key("0123456789abcdef")));
    envelope
}

fn sample_reply(customers: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<FbiXml><Ticket><UserID>1</UserID><Key>abc</Key></Ticket><FbiMsgsRs statusCode="1000"><CustomerGetRs>"#,
    );
    for i in 0..customers {
        xml.push_str(&format!(
            "<Customer><CustomerID>{i}</CustomerID><Name>Customer {i}</Name><Status>Normal</Status></Customer>"
        ));
    }
    xml.push_str("</CustomerGetRs></FbiMsgsRs></FbiXml>");
    xml.into_bytes()
}

fn bench_envelope_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_serialization");

    group.bench_function("compose_and_attach", |b| {
        b.iter(sample_request);
    });

    group.bench_function("to_bytes", |b| {
        let envelope = sample_request();
        b.iter(|| black_box(&envelope).to_bytes());
    });

    group.finish();
}

fn bench_reply_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply_parsing");

    for count in [1usize, 100] {
        let body = sample_reply(count);
        group.bench_function(format!("parse_{count}_customers"), |b| {
            b.iter(|| Envelope::parse(black_box(&body)));
        });
    }

    group.bench_function("ticket_and_status", |b| {
        let envelope = Envelope::parse(&sample_reply(1)).unwrap();
        b.iter(|| {
            let envelope = black_box(&envelope);
            (envelope.ticket(), envelope.status())
        });
    });

    group.finish();
}

fn bench_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("framing");

    let body = sample_reply(100);
    group.bench_function("encode", |b| {
        b.iter(|| encode_frame(black_box(&body)));
    });

    let frame = encode_frame(&body).unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| read_frame(&mut Cursor::new(black_box(&frame)), DEFAULT_MAX_FRAME_LEN));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_envelope_serialization,
    bench_reply_parsing,
    bench_framing
);
criterion_main!(benches);

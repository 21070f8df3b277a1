use bytes::{Bytes, BytesMut};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use openliveview::config::ProtocolConfig;
use openliveview::core::codec::LiveViewCodec;
use openliveview::protocol::message::{MenuItem, Message, NavAction, NavType};
use openliveview::protocol::registry::decode_frame;
use openliveview::protocol::Dispatcher;
use openliveview::utils::FixedClock;
use tokio_util::codec::Encoder;

fn menu_item(icon_size: usize) -> Message {
    Message::MenuItem(MenuItem {
        index: 0,
        attention: false,
        attribute: 0,
        label: "Test".to_string(),
        icon: Bytes::from(vec![0x5A; icon_size]),
    })
}

#[allow(clippy::unwrap_used)]
fn bench_menu_item_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_item_encode_decode");
    let icon_sizes = [0usize, 512, 4096, 65535];

    for &size in &icon_sizes {
        let msg = menu_item(size);
        let frame = msg.to_bytes();
        group.throughput(Throughput::Bytes(frame.len() as u64));

        group.bench_function(format!("encode_{size}b"), |b| {
            b.iter_batched(
                || msg.clone(),
                |msg| {
                    let mut buf = BytesMut::with_capacity(size + 16);
                    let mut codec = LiveViewCodec::default();
                    codec.encode(msg, &mut buf).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("decode_{size}b"), |b| {
            b.iter(|| {
                let decoded = decode_frame(&frame);
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

fn bench_read_chunk(c: &mut Criterion) {
    // A full read of small navigation frames, as a chatty device produces
    let nav = Message::Navigation {
        action: NavAction::Press,
        nav_type: NavType::Down,
    };
    let mut chunk = BytesMut::new();
    while chunk.len() + 3 <= 4096 {
        nav.encode(&mut chunk, Default::default());
    }
    let chunk = chunk.freeze();

    let mut group = c.benchmark_group("read_chunk");
    group.throughput(Throughput::Bytes(chunk.len() as u64));
    group.bench_function("decode_4k_navigation", |b| {
        let codec = LiveViewCodec::default();
        b.iter(|| {
            let decoded = codec.decode_chunk(&chunk);
            assert!(decoded.error.is_none());
            criterion::black_box(decoded.messages);
        })
    });
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::with_clock(
        ProtocolConfig::default(),
        Bytes::from(vec![0u8; 4096]),
        Box::new(FixedClock(0)),
    );
    let inbound = [
        Message::GetTime,
        Message::GetMenuItems,
        Message::Navigation {
            action: NavAction::Press,
            nav_type: NavType::MenuSelect,
        },
    ];

    c.bench_function("dispatch_responses", |b| {
        b.iter(|| {
            for msg in &inbound {
                criterion::black_box(dispatcher.respond(msg));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_menu_item_encode_decode,
    bench_read_chunk,
    bench_dispatch
);
criterion_main!(benches);

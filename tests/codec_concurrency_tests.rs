use example_thriftmux_service_definition::{CALC_SERVICE, calc_type_locator};
use rand::Rng;
use std::sync::Arc;
use thriftmux::{
    ChannelConfig, CodecError, CodecMessage, Decoded, ThriftCodec,
    constants::{FRAME_MAGIC, FRAME_MIN_LENGTH},
    frame::FrameDecodeError,
    rpc::{Invocation, Request, Response, RpcResult},
    value::Value,
};

fn add(id: i64, a: i32, b: i32) -> CodecMessage {
    CodecMessage::Request(Request::new(
        id,
        Invocation::new(CALC_SERVICE, "add")
            .with_argument(Value::I32(a))
            .with_argument(Value::I32(b)),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_codecs_serve_concurrent_calls() {
    let client = Arc::new(ThriftCodec::new(calc_type_locator()));
    let server = Arc::new(ThriftCodec::new(calc_type_locator()));
    let config = Arc::new(ChannelConfig::framed());

    let mut rng = rand::rng();
    let operands: Vec<(i32, i32)> = (0..64)
        .map(|_| (rng.random::<i16>() as i32, rng.random::<i16>() as i32))
        .collect();

    let mut tasks = Vec::new();
    for (index, (a, b)) in operands.into_iter().enumerate() {
        let client = Arc::clone(&client);
        let server = Arc::clone(&server);
        let config = Arc::clone(&config);

        tasks.push(tokio::spawn(async move {
            let id = index as i64 + 1;
            let bytes = client.encode(&config, &add(id, a, b)).expect("encode call");

            let Decoded::Message { message, .. } = server.decode(&config, &bytes).expect("decode")
            else {
                panic!("call {id} reported as partial");
            };
            let CodecMessage::Request(request) = message else {
                panic!("call {id} decoded as something else");
            };
            let (a, b) = match request.invocation.arguments.as_slice() {
                [Some(Value::I32(a)), Some(Value::I32(b))] => (*a, *b),
                other => panic!("call {id} decoded with arguments {other:?}"),
            };

            let reply = server
                .encode(
                    &config,
                    &CodecMessage::Response(Response::new(
                        request.id,
                        RpcResult::value(Value::I32(a + b)),
                    )),
                )
                .expect("encode reply");

            (id, a + b, client.decode(&config, &reply).expect("decode reply"))
        }));
    }

    for task in tasks {
        let (id, sum, decoded) = task.await.expect("task panicked");
        let Decoded::Message { message, .. } = decoded else {
            panic!("reply {id} reported as partial");
        };
        assert_eq!(
            message,
            CodecMessage::Response(Response::new(id, RpcResult::value(Value::I32(sum))))
        );
    }

    assert_eq!(server.pending_calls().len(), 64);
    // add_args and add_result, however many threads raced to resolve them
    assert_eq!(server.types().len(), 2);
    assert_eq!(client.types().len(), 2);
}

#[test]
fn junk_magic_never_falls_through() {
    let codec = ThriftCodec::new(calc_type_locator());
    let config = ChannelConfig::framed();
    let mut rng = rand::rng();

    for _ in 0..256 {
        let mut bytes = vec![0u8; rng.random_range(FRAME_MIN_LENGTH..64)];
        rng.fill(&mut bytes[..]);
        if u16::from_be_bytes([bytes[0], bytes[1]]) == FRAME_MAGIC {
            bytes[0] ^= 0xff;
        }
        let magic = u16::from_be_bytes([bytes[0], bytes[1]]);

        assert_eq!(
            codec.decode(&config, &bytes),
            Err(CodecError::Protocol(FrameDecodeError::BadMagic(magic)))
        );
    }
}

#[test]
fn arbitrary_prefixes_never_decode_early() {
    let codec = ThriftCodec::new(calc_type_locator());
    let config = ChannelConfig::framed();
    let mut rng = rand::rng();

    let bytes = codec
        .encode(&config, &add(1, rng.random(), rng.random()))
        .expect("encode");

    for cut in FRAME_MIN_LENGTH..bytes.len() {
        assert_eq!(codec.decode(&config, &bytes[..cut]), Ok(Decoded::NeedMoreInput));
    }
}

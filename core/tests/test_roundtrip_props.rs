#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;

    use plz4_core::compression::CodecOptions;
    use plz4_core::stream::framing::decode_frame;
    use plz4_core::stream::{run_compress_pipeline, run_decompress_pipeline, PipelineConfig};

    fn codec_strategy() -> impl Strategy<Value = CodecOptions> {
        prop_oneof![
            Just(CodecOptions::lz4()),
            (1i32..=6).prop_map(|level| CodecOptions::zstd(Some(level))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        // Arbitrary data, block sizes and pool sizes always round-trip.
        #[test]
        fn prop_round_trip(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            chunk_size in 1usize..300,
            workers in 1usize..6,
            codec in codec_strategy(),
        ) {
            let config = PipelineConfig::new(chunk_size, workers, codec);

            let mut wire = Vec::new();
            let enc = run_compress_pipeline(Cursor::new(&data), &mut wire, &config, &config.codec).unwrap();
            prop_assert_eq!(enc.blocks as usize, data.len().div_ceil(chunk_size));
            prop_assert!(enc.peak_inflight <= workers);

            let mut back = Vec::new();
            run_decompress_pipeline(Cursor::new(&wire), &mut back, &config, &config.codec).unwrap();
            prop_assert_eq!(back, data);
        }

        // Each frame's checksum is the CRC-32 of its own block, in input order.
        #[test]
        fn prop_frames_follow_blocks(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            chunk_size in 1usize..128,
            workers in 1usize..5,
        ) {
            let config = PipelineConfig::new(chunk_size, workers, CodecOptions::lz4());
            let mut wire = Vec::new();
            run_compress_pipeline(Cursor::new(&data), &mut wire, &config, &config.codec).unwrap();

            let mut rest = wire.as_slice();
            let mut blocks = data.chunks(chunk_size);
            while !rest.is_empty() {
                let (view, tail) = decode_frame(rest).unwrap();
                let block = blocks.next().unwrap();
                prop_assert_eq!(view.header.checksum, crc32fast::hash(block));
                rest = tail;
            }
            prop_assert!(blocks.next().is_none());
        }
    }
}

// # Slot pool + block workers
//
// * buffer capacities per mode
// * one worker per slot, reused across many blocks
// * typed worker failures come back through the slot
// * shutdown is deterministic (explicit and on drop)

#[cfg(test)]
mod tests {
    use plz4_core::compression::{
        BlockCodec, CodecFactory, CodecOptions, CompressionError, Lz4BlockCodec, ZstdBlockCodec,
    };
    use plz4_core::stream::block_worker::{process_compress_block, process_decompress_block, WorkerError};
    use plz4_core::stream::pool::SlotPool;
    use plz4_core::stream::slot::{BlockBuffers, SlotState};
    use plz4_core::stream::PipelineMode;
    use plz4_core::types::StreamError;

    struct BrokenFactory;

    impl CodecFactory for BrokenFactory {
        fn create(&self) -> Result<Box<dyn BlockCodec>, CompressionError> {
            Err(CompressionError::CodecInitFailed { codec: "broken", msg: "no codec".into() })
        }
    }

    /// Claims a bound no buffer can hold.
    struct UnboundedCodec;

    impl BlockCodec for UnboundedCodec {
        fn name(&self) -> &'static str {
            "unbounded"
        }

        fn compress_bound(&self, _input_len: usize) -> usize {
            usize::MAX
        }

        fn compress_into(&mut self, _input: &[u8], _output: &mut [u8]) -> Result<usize, CompressionError> {
            Ok(0)
        }

        fn decompress_into(&mut self, _input: &[u8], _output: &mut [u8]) -> Result<usize, CompressionError> {
            Ok(0)
        }
    }

    struct UnboundedFactory;

    impl CodecFactory for UnboundedFactory {
        fn create(&self) -> Result<Box<dyn BlockCodec>, CompressionError> {
            Ok(Box::new(UnboundedCodec))
        }
    }

    #[test]
    fn capacities_follow_mode() {
        let bound = Lz4BlockCodec::new().compress_bound(64);

        let mut pool = SlotPool::start(PipelineMode::Compress, 3, 64, &CodecOptions::lz4()).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.compress_bound(), bound);
        for (i, slot) in pool.slots_mut().iter_mut().enumerate() {
            assert_eq!(slot.id(), i);
            assert_eq!(slot.state(), SlotState::Idle);
            let b = slot.buffers_mut().unwrap();
            assert_eq!(b.input_capacity(), 64);
            assert_eq!(b.output_capacity(), bound);
        }

        let mut pool = SlotPool::start(PipelineMode::Decompress, 2, 64, &CodecOptions::lz4()).unwrap();
        let b = pool.slots_mut()[1].buffers_mut().unwrap();
        assert_eq!(b.input_capacity(), bound);
        assert_eq!(b.output_capacity(), 64);
    }

    #[test]
    fn zstd_pool_sizes_buffers_from_its_own_bound() {
        let bound = ZstdBlockCodec::new(None).unwrap().compress_bound(64);
        let mut pool = SlotPool::start(PipelineMode::Compress, 2, 64, &CodecOptions::zstd(None)).unwrap();
        assert_eq!(pool.compress_bound(), bound);
        assert_eq!(pool.slots_mut()[0].buffers_mut().unwrap().output_capacity(), bound);
    }

    #[test]
    fn workers_process_many_rounds_on_the_same_slots() {
        let mut pool = SlotPool::start(PipelineMode::Compress, 2, 16, &CodecOptions::lz4()).unwrap();

        for round in 0..10u8 {
            for slot in pool.slots_mut().iter_mut() {
                let b = slot.buffers_mut().unwrap();
                b.input_buf_mut().fill(round);
                b.input_len = 16;
                slot.signal_work().unwrap();
            }
            for slot in pool.slots_mut().iter_mut() {
                let b = slot.wait_result().unwrap();
                assert_eq!(b.checksum, crc32fast::hash(&[round; 16]));
                let back = lz4_flex::block::decompress(b.output(), 16).unwrap();
                assert_eq!(back, vec![round; 16]);
                slot.release().unwrap();
            }
        }

        pool.shutdown();
        assert!(pool.slots_mut().iter().all(|s| s.is_closed()));
    }

    #[test]
    fn checksum_mismatch_comes_back_typed() {
        let mut pool = SlotPool::start(PipelineMode::Decompress, 1, 32, &CodecOptions::lz4()).unwrap();
        let compressed = lz4_flex::block::compress(b"hello hello hello");

        let slot = &mut pool.slots_mut()[0];
        let b = slot.buffers_mut().unwrap();
        b.input_buf_mut()[..compressed.len()].copy_from_slice(&compressed);
        b.input_len = compressed.len();
        b.checksum = crc32fast::hash(b"hello hello hellO");
        slot.signal_work().unwrap();

        let err = slot.wait_result().err().unwrap();
        assert!(err.is_corruption());
        match err {
            StreamError::Worker(e) => assert_eq!(e.slot(), 0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn codec_that_cannot_be_built_fails_before_workers_start() {
        let err = SlotPool::start(PipelineMode::Compress, 4, 64, &BrokenFactory).err().unwrap();
        assert!(matches!(err, StreamError::Compression(CompressionError::CodecInitFailed { .. })));
    }

    #[test]
    fn unreservable_slot_buffers_fail_pool_start() {
        for mode in [PipelineMode::Compress, PipelineMode::Decompress] {
            let err = SlotPool::start(mode, 2, 64, &UnboundedFactory).err().unwrap();
            assert!(matches!(err, StreamError::Allocation { bytes: usize::MAX }), "{mode}");
        }
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = SlotPool::start(PipelineMode::Compress, 0, 64, &CodecOptions::lz4()).err().unwrap();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn dropping_a_pool_with_work_in_flight_joins_cleanly() {
        let mut pool = SlotPool::start(PipelineMode::Compress, 4, 1024, &CodecOptions::lz4()).unwrap();
        for slot in pool.slots_mut().iter_mut() {
            slot.buffers_mut().unwrap().input_len = 1024;
            slot.signal_work().unwrap();
        }
        drop(pool);
    }

    #[test]
    fn block_helpers_round_trip() {
        let mut codec = Lz4BlockCodec::new();
        let data = b"the quick brown fox jumps over the lazy dog, the quick brown fox";

        let mut c = BlockBuffers::allocate(data.len(), codec.compress_bound(data.len())).unwrap();
        c.input_buf_mut().copy_from_slice(data);
        c.input_len = data.len();
        process_compress_block(0, &mut c, &mut codec).unwrap();
        assert_eq!(c.checksum, crc32fast::hash(data));

        let mut d = BlockBuffers::allocate(c.output_capacity(), data.len()).unwrap();
        d.input_buf_mut()[..c.output_len].copy_from_slice(c.output());
        d.input_len = c.output_len;
        d.checksum = c.checksum;
        process_decompress_block(0, &mut d, &mut codec).unwrap();
        assert_eq!(d.output(), data);

        // Output buffer smaller than the block: codec failure, not truncation.
        let mut small = BlockBuffers::allocate(c.output_capacity(), 8).unwrap();
        small.input_buf_mut()[..c.output_len].copy_from_slice(c.output());
        small.input_len = c.output_len;
        let err = process_decompress_block(2, &mut small, &mut codec).unwrap_err();
        assert!(matches!(err, WorkerError::Codec { slot: 2, .. }));
    }
}

//! Concurrency integration tests
//!
//! Parallel dispatch against sequential dispatch, and many batches sharing
//! one subscriber context.

use std::sync::Arc;

use integration_tests::test_fixtures::TEST_SETS;
use integration_tests::{custom_constants_context, decode_hex, init_test_logging, TestResult};
use milenage_crypto::{
    compute_all_parallel, Aes128Block, Block, BlockCipher, Dispatch, Evaluator, Milenage,
    MilenageError, MilenageResult, Output, BLOCK_SIZE,
};
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_matches_sequential_all_sets() -> TestResult {
    init_test_logging();

    for v in TEST_SETS {
        let context = Arc::new(v.context());
        let (rand, sqn, amf) = (decode_hex(v.rand), decode_hex(v.sqn), decode_hex(v.amf));

        let sequential = Evaluator::sequential(Arc::clone(&context))
            .compute_all(&rand, &sqn, &amf)
            .await?;
        let parallel = Evaluator::parallel(context).compute_all(&rand, &sqn, &amf).await?;
        assert_eq!(sequential, parallel, "{}", v.name);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_custom_constants_parallel() -> TestResult {
    let v = TEST_SETS[0];
    let context = Arc::new(custom_constants_context());
    let set = compute_all_parallel(context, &decode_hex(v.rand), &decode_hex(v.sqn), &decode_hex(v.amf))
        .await?;
    assert_eq!(set.get(Output::Ck), Some(decode_hex("6b4c2fa2e83f66e0c8d6b44165d84b8d").as_slice()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_context_concurrent_batches() -> TestResult {
    init_test_logging();

    let v = TEST_SETS[0];
    let evaluator = Evaluator::new(Arc::new(v.context()), Dispatch::Parallel);
    let expected = v
        .context()
        .compute_all(&decode_hex(v.rand), &decode_hex(v.sqn), &decode_hex(v.amf))?;

    let mut batches = JoinSet::new();
    for _ in 0..16 {
        let evaluator = evaluator.clone();
        batches.spawn(async move {
            evaluator
                .compute_all(&decode_hex(v.rand), &decode_hex(v.sqn), &decode_hex(v.amf))
                .await
        });
    }

    let mut completed = 0;
    while let Some(joined) = batches.join_next().await {
        assert_eq!(joined??, expected);
        completed += 1;
    }
    assert_eq!(completed, 16);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_subscribers_in_parallel() -> TestResult {
    let mut batches = JoinSet::new();
    for v in TEST_SETS {
        batches.spawn(async move {
            let set = compute_all_parallel(
                Arc::new(v.context()),
                &decode_hex(v.rand),
                &decode_hex(v.sqn),
                &decode_hex(v.amf),
            )
            .await;
            (v, set)
        });
    }

    while let Some(joined) = batches.join_next().await {
        let (v, set) = joined?;
        let set = set?;
        assert_eq!(set.get(Output::Res), Some(decode_hex(v.res).as_slice()), "{}", v.name);
    }
    Ok(())
}

/// AES that reports a fault once `budget` encryptions are spent
struct FlakyCipher {
    inner: Aes128Block,
    budget: std::sync::atomic::AtomicUsize,
}

impl BlockCipher for FlakyCipher {
    fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]> {
        use std::sync::atomic::Ordering;
        let spent = self.budget.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |b| b.checked_sub(1));
        match spent {
            Ok(_) => self.inner.encrypt_block(block),
            Err(_) => Err(MilenageError::Cipher("HSM unavailable".into())),
        }
    }
}

fn flaky_context(budget: usize) -> Arc<Milenage<FlakyCipher>> {
    let v = TEST_SETS[0];
    let cipher = FlakyCipher {
        inner: Aes128Block::new(&v.key()),
        budget: std::sync::atomic::AtomicUsize::new(budget),
    };
    Arc::new(Milenage::new(cipher, Block::new(v.opc_bytes())))
}

#[tokio::test]
async fn test_cipher_fault_aborts_batch_in_both_modes() {
    init_test_logging();
    let v = TEST_SETS[0];
    let (rand, sqn, amf) = (decode_hex(v.rand), decode_hex(v.sqn), decode_hex(v.amf));

    for dispatch in [Dispatch::Sequential, Dispatch::Parallel] {
        // TEMP and three stages succeed
        let evaluator = Evaluator::new(flaky_context(4), dispatch);
        let result = evaluator.compute_all(&rand, &sqn, &amf).await;
        assert_eq!(
            result,
            Err(MilenageError::Cipher("HSM unavailable".into())),
            "{dispatch}"
        );
    }
}

#[tokio::test]
async fn test_cipher_with_exact_budget_succeeds() -> TestResult {
    let v = TEST_SETS[0];
    // TEMP plus five stages
    let evaluator = Evaluator::parallel(flaky_context(6));
    let set = evaluator
        .compute_all(&decode_hex(v.rand), &decode_hex(v.sqn), &decode_hex(v.amf))
        .await?;
    assert!(set.is_complete());
    Ok(())
}

//! Integration tests for casecheck against a real filesystem

/// Install a subscriber so `RUST_LOG=casecheck=trace cargo test` shows
/// cache traces; later calls are no-ops.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

mod verify_tests {
    use casecheck::cache::DirListingCache;
    use casecheck::fs::TokioDirectoryLister;
    use casecheck::{CaseVerifier, VerificationResult};
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn harness() -> (Arc<DirListingCache>, CaseVerifier) {
        crate::init_tracing();
        let cache = Arc::new(DirListingCache::new(Arc::new(TokioDirectoryLister)));
        let verifier = CaseVerifier::new(Arc::clone(&cache));
        (cache, verifier)
    }

    fn project(root: &Path) {
        fs::create_dir_all(root.join("src/Components")).unwrap();
        fs::write(root.join("src/App.js"), b"").unwrap();
        fs::write(root.join("src/Components/Button.js"), b"").unwrap();
    }

    #[tokio::test]
    async fn exact_casing_confirmed() {
        let dir = TempDir::new().unwrap();
        project(dir.path());
        let (_, verifier) = harness();

        let result = verifier.verify(&dir.path().join("src/Components/Button.js")).await;
        assert_eq!(result, VerificationResult::Confirmed);
    }

    #[tokio::test]
    async fn wrong_leaf_casing_detected() {
        let dir = TempDir::new().unwrap();
        project(dir.path());
        let (_, verifier) = harness();

        let requested = dir.path().join("src/app.js");
        let result = verifier.verify(&requested).await;
        assert_eq!(
            result,
            VerificationResult::Mismatch {
                path: requested,
                corrected: "App.js".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn wrong_directory_casing_detected() {
        let dir = TempDir::new().unwrap();
        project(dir.path());
        let (_, verifier) = harness();

        // The directory segment itself is the leaf being verified here,
        // so the mismatch is visible even on a case-sensitive filesystem.
        let result = verifier.verify(&dir.path().join("src/components")).await;
        assert_eq!(
            result,
            VerificationResult::Mismatch {
                path: dir.path().join("src/components"),
                corrected: "Components".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn missing_file_is_nonexistent() {
        let dir = TempDir::new().unwrap();
        project(dir.path());
        let (_, verifier) = harness();

        let result = verifier.verify(&dir.path().join("src/zzz.js")).await;
        assert_eq!(result, VerificationResult::Nonexistent);
    }

    #[tokio::test]
    async fn unreadable_directory_absorbed_as_nonexistent() {
        let dir = TempDir::new().unwrap();
        project(dir.path());
        let (_, verifier) = harness();

        let result = verifier.verify(&dir.path().join("src/gone/Button.js")).await;
        assert_eq!(result, VerificationResult::Nonexistent);
    }

    #[tokio::test]
    async fn sibling_files_share_one_listing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.js"), b"").unwrap();
        fs::write(dir.path().join("src/b.js"), b"").unwrap();
        let (cache, verifier) = harness();

        verifier.verify(&dir.path().join("src/a.js")).await;
        let reads_after_first = cache.fs_reads();
        verifier.verify(&dir.path().join("src/b.js")).await;

        // The second walk is served entirely from cache.
        assert_eq!(cache.fs_reads(), reads_after_first);
    }

    #[tokio::test]
    async fn reset_triggers_fresh_reads() {
        let dir = TempDir::new().unwrap();
        project(dir.path());
        let (cache, verifier) = harness();

        verifier.verify(&dir.path().join("src/App.js")).await;
        let reads_per_pass = cache.fs_reads();
        assert!(reads_per_pass > 0);

        cache.reset().await;
        assert_eq!(cache.fs_reads(), 0);

        verifier.verify(&dir.path().join("src/App.js")).await;
        assert_eq!(cache.fs_reads(), reads_per_pass);
    }

    #[tokio::test]
    async fn unicode_composition_forms_match() {
        let dir = TempDir::new().unwrap();
        // Store the decomposed spelling on disk, request the precomposed one.
        fs::write(dir.path().join("cafe\u{301}.txt"), b"").unwrap();
        let (_, verifier) = harness();

        let result = verifier.verify(&dir.path().join("caf\u{e9}.txt")).await;
        assert_eq!(result, VerificationResult::Confirmed);
    }
}

mod plugin_tests {
    use casecheck::{CaseSensitivePaths, Options, ResolutionKind, ResolvedModule};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn request(dir: &TempDir, rel: &str) -> ResolvedModule {
        crate::init_tracing();
        ResolvedModule::new(
            dir.path().join(rel).to_string_lossy().into_owned(),
            ResolutionKind::NewModule,
        )
    }

    #[tokio::test]
    async fn resolution_with_query_suffix_passes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("App.js"), b"").unwrap();
        let plugin = CaseSensitivePaths::new(Options::default());

        let resolution = request(&dir, "App.js?raw");
        assert!(plugin.after_resolve(&resolution).await.is_ok());
    }

    #[tokio::test]
    async fn mismatched_resolution_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("App.js"), b"").unwrap();
        let plugin = CaseSensitivePaths::new(Options::default());

        let err = plugin.after_resolve(&request(&dir, "app.js")).await.unwrap_err();
        assert_eq!(err.corrected(), "App.js");
        assert!(err.to_string().contains("does not match the corresponding path on disk"));
    }

    #[tokio::test]
    async fn missing_file_is_not_this_plugins_error() {
        let dir = TempDir::new().unwrap();
        let plugin = CaseSensitivePaths::new(Options::default());

        assert!(plugin.after_resolve(&request(&dir, "missing.js")).await.is_ok());
    }

    #[tokio::test]
    async fn before_emit_checks_the_dependency_set() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/App.js"), b"").unwrap();
        fs::write(dir.path().join("src/util.js"), b"").unwrap();
        let plugin = CaseSensitivePaths::new(Options {
            use_before_emit_hook: true,
            ..Options::default()
        });
        assert!(plugin.use_before_emit_hook());

        let deps: Vec<PathBuf> = vec![
            dir.path().join("src/App.js"),
            dir.path().join("src/Util.js"),
        ];
        let errors = plugin.before_emit(deps).await;

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].corrected(), "util.js");
    }

    #[tokio::test]
    async fn passes_start_cold_after_completion() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("App.js"), b"").unwrap();
        let plugin = CaseSensitivePaths::new(Options::default());

        plugin.after_resolve(&request(&dir, "App.js")).await.unwrap();
        assert!(plugin.fs_reads() > 0);

        plugin.build_complete().await;
        assert_eq!(plugin.fs_reads(), 0);
    }
}

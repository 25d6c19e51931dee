#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::runtime::Runtime;
    use tokio::sync::Notify;

    use crate::api::{PairValidation, PathApi, ValidationResult};
    use crate::error::ApiError;
    use crate::field::{FieldOptions, PathField};

    pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(200);
    pub const VALIDATE_DEBOUNCE: Duration = Duration::from_millis(500);

    /// Directory tree served by `FakePathApi::nas()`
    pub const NAS_DIRS: &[&str] = &[
        "/volume1",
        "/volume2",
        "/volume1/Photos",
        "/volume1/Photography",
        "/volume1/Backup",
        "/volume1/Photos/2023",
        "/volume1/Photos/2024",
        "/volume1/Photos/Holidays",
    ];

    /// In-process stand-in for the path service, backed by a fixed tree.
    ///
    /// Every call is recorded. A call can be held back with a gate until the
    /// test releases it, which is how tests force responses out of order.
    pub struct FakePathApi {
        dirs: Vec<String>,
        fail_suggest: AtomicBool,
        fail_validate: AtomicBool,
        echo_normalized: AtomicBool,
        pair_result: Mutex<Option<PairValidation>>,
        suggest_calls: Mutex<Vec<String>>,
        validate_calls: Mutex<Vec<String>>,
        pair_calls: Mutex<Vec<(String, String)>>,
        suggest_gates: Mutex<HashMap<String, Arc<Notify>>>,
        validate_gates: Mutex<HashMap<String, Arc<Notify>>>,
    }

    impl FakePathApi {
        pub fn new(dirs: &[&str]) -> Self {
            Self {
                dirs: dirs.iter().map(|d| d.to_string()).collect(),
                fail_suggest: AtomicBool::new(false),
                fail_validate: AtomicBool::new(false),
                echo_normalized: AtomicBool::new(false),
                pair_result: Mutex::new(None),
                suggest_calls: Mutex::new(Vec::new()),
                validate_calls: Mutex::new(Vec::new()),
                pair_calls: Mutex::new(Vec::new()),
                suggest_gates: Mutex::new(HashMap::new()),
                validate_gates: Mutex::new(HashMap::new()),
            }
        }

        pub fn nas() -> Arc<Self> {
            Arc::new(Self::new(NAS_DIRS))
        }

        pub fn fail_suggest(&self, fail: bool) {
            self.fail_suggest.store(fail, Ordering::SeqCst);
        }

        pub fn fail_validate(&self, fail: bool) {
            self.fail_validate.store(fail, Ordering::SeqCst);
        }

        /// Report `normalized_path` even when it equals the requested path
        pub fn echo_normalized(&self, echo: bool) {
            self.echo_normalized.store(echo, Ordering::SeqCst);
        }

        pub fn set_pair_result(&self, result: PairValidation) {
            *self.pair_result.lock().unwrap() = Some(result);
        }

        pub fn suggest_calls(&self) -> Vec<String> {
            self.suggest_calls.lock().unwrap().clone()
        }

        pub fn validate_calls(&self) -> Vec<String> {
            self.validate_calls.lock().unwrap().clone()
        }

        pub fn pair_calls(&self) -> Vec<(String, String)> {
            self.pair_calls.lock().unwrap().clone()
        }

        /// Hold back `suggest(partial)` until the returned gate is notified
        pub fn gate_suggest(&self, partial: &str) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            self.suggest_gates
                .lock()
                .unwrap()
                .insert(partial.to_string(), gate.clone());
            gate
        }

        /// Hold back `validate(path)` until the returned gate is notified
        pub fn gate_validate(&self, path: &str) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            self.validate_gates
                .lock()
                .unwrap()
                .insert(path.to_string(), gate.clone());
            gate
        }

        fn exists(&self, path: &str) -> bool {
            let trimmed = path.trim_end_matches('/');
            trimmed.is_empty() || self.dirs.iter().any(|d| d == trimmed)
        }

        fn children(&self, parent: &str) -> Vec<String> {
            let prefix = if parent.ends_with('/') {
                parent.to_string()
            } else {
                format!("{}/", parent)
            };
            self.dirs
                .iter()
                .filter(|d| {
                    d.strip_prefix(&prefix)
                        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
                })
                .cloned()
                .collect()
        }

        /// Relative and volume-less paths are resolved onto /volume1
        fn normalize(path: &str) -> String {
            if path.starts_with("/volume") {
                path.to_string()
            } else if path.starts_with('/') {
                format!("/volume1{}", path)
            } else {
                format!("/volume1/{}", path)
            }
        }
    }

    #[async_trait]
    impl PathApi for FakePathApi {
        async fn suggest(&self, partial: &str) -> Result<Vec<String>, ApiError> {
            self.suggest_calls.lock().unwrap().push(partial.to_string());
            let gate = self.suggest_gates.lock().unwrap().get(partial).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.fail_suggest.load(Ordering::SeqCst) {
                return Err(ApiError::Network("connection refused".to_string()));
            }

            if partial.ends_with('/') {
                return Ok(self.children(partial));
            }
            let (parent, base) = match partial.rfind('/') {
                Some(0) => ("/", &partial[1..]),
                Some(idx) => (&partial[..idx], &partial[idx + 1..]),
                None => ("/", partial),
            };
            let base = base.to_lowercase();
            Ok(self
                .children(parent)
                .into_iter()
                .filter(|d| {
                    d.rsplit('/')
                        .next()
                        .is_some_and(|name| name.to_lowercase().starts_with(&base))
                })
                .collect())
        }

        async fn validate(&self, path: &str) -> Result<ValidationResult, ApiError> {
            self.validate_calls.lock().unwrap().push(path.to_string());
            let gate = self.validate_gates.lock().unwrap().get(path).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.fail_validate.load(Ordering::SeqCst) {
                return Err(ApiError::Api {
                    code: 502,
                    message: "bad gateway".to_string(),
                });
            }

            let normalized = Self::normalize(path);
            let result = if self.exists(&normalized) {
                ValidationResult::valid()
            } else {
                ValidationResult::rejected(format!("Path does not exist: {}", normalized))
            };
            if normalized != path || self.echo_normalized.load(Ordering::SeqCst) {
                Ok(result.with_normalized_path(normalized))
            } else {
                Ok(result)
            }
        }

        async fn validate_pair(
            &self,
            backup_path: &str,
            sorted_path: &str,
        ) -> Result<PairValidation, ApiError> {
            self.pair_calls
                .lock()
                .unwrap()
                .push((backup_path.to_string(), sorted_path.to_string()));
            if let Some(result) = self.pair_result.lock().unwrap().clone() {
                return Ok(result);
            }
            Ok(PairValidation {
                valid: true,
                errors: Vec::new(),
                warnings: Vec::new(),
                backup_path: Some(backup_path.to_string()),
                sorted_path: Some(sorted_path.to_string()),
            })
        }
    }

    pub fn runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    pub fn test_options() -> FieldOptions {
        FieldOptions {
            storage_key: None,
            separator: '/',
            suggest_debounce: SUGGEST_DEBOUNCE,
            validate_debounce: VALIDATE_DEBOUNCE,
            max_visible_rows: 8,
            stale_responses: Default::default(),
        }
    }

    /// Mounted, focused field over `api`
    pub fn mounted_field(rt: &Runtime, api: Arc<FakePathApi>, now: Instant) -> PathField {
        mounted_field_with(rt, api, test_options(), now)
    }

    pub fn mounted_field_with(
        rt: &Runtime,
        api: Arc<FakePathApi>,
        options: FieldOptions,
        now: Instant,
    ) -> PathField {
        let mut field = PathField::new(options, api, rt.handle().clone());
        field.mount(now);
        field.focus();
        field
    }

    /// Apply responses until nothing is in flight
    pub fn settle(rt: &Runtime, field: &mut PathField, now: Instant) {
        while field.has_in_flight() {
            if !rt.block_on(field.next_response(now)) {
                break;
            }
        }
    }

    /// Type `value`, let both debounce windows run out, and apply the answers
    pub fn type_and_settle(rt: &Runtime, field: &mut PathField, value: &str, now: Instant) -> Instant {
        field.input(value, now);
        let later = now + VALIDATE_DEBOUNCE;
        field.tick(later);
        settle(rt, field, later);
        later
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }
}

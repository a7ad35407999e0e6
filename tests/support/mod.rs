use std::sync::Mutex;

// Repository selection and MongoDB settings are read straight from process
// env vars, which Rust's parallel test runner shares across threads. Every
// test that touches them goes through this lock and restores the prior
// values on the way out, panic included.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Runs `f` with the given environment variables applied, `Some(v)` setting
/// and `None` unsetting, then puts everything back the way it was.
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX poisoned");

    let previous: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    let restore = RestoreEnv { previous };

    for (key, value) in vars {
        apply(key, value.map(str::to_owned));
    }

    let result = f();
    drop(restore);
    result
}

struct RestoreEnv {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for RestoreEnv {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            apply(&key, value);
        }
    }
}

fn apply(key: &str, value: Option<String>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}

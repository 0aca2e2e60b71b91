use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Generates an alphanumeric secret of the given length, used for
/// api keys and trigger secrets that are not provided by the environment.
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

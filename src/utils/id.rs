/// Generates a unique identifier suitable for an idempotency key.
///
/// The identifier is 30 characters long and composed of uppercase English
/// letters (`A-Z`) and digits (`0-9`), generated with the `nanoid` crate.
///
/// # Examples
/// ```
/// use threec_client::utils::id::get_id;
/// let key = get_id();
/// assert_eq!(key.len(), 30);
/// ```
pub fn get_id() -> String {
    let alphabet: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".chars().collect();
    nanoid::nanoid!(30, &alphabet)
}

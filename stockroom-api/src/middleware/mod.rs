/// API middleware
///
/// - `identity`: resolves the `token` session cookie into an `Identity`
///   request extension on every inbound request

pub mod identity;

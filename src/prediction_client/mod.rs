pub mod impl_fake;
pub mod impl_http;
pub mod interface;

#[cfg(test)]
mod tests;

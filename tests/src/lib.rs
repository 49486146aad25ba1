#[cfg(test)]
mod session;

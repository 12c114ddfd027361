#[cfg(test)]
mod test_voting_flow;
#[cfg(test)]
mod utils;

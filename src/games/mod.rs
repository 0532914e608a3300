pub mod rand_num;

/// Metadata about a game
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub name: &'static str,
    pub description: &'static str,
}

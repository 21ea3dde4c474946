/// What has to happen to bring one live entity in line with its template.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<C, U> {
    /// Live state already matches.
    NoOp,
    /// The entity does not exist yet.
    Create(C),
    /// The entity exists but some attributes drifted.
    Update(U),
}

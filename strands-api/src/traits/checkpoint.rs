//! Defines the `Checkpoint` trait used to make multi-call operations atomic.
//!
//! Every collaborator the ledger mutates implements it. An operation opens a
//! checkpoint on each collaborator before its first call and then either
//! commits (keeps all effects) or rolls back (restores the saved state) once
//! the outcome is known. Checkpoints nest as a stack.

pub trait Checkpoint {
    /// Saves the current state on top of the checkpoint stack.
    fn checkpoint(&mut self);

    /// Discards the most recent checkpoint, keeping every change made since.
    fn commit(&mut self);

    /// Restores the state saved by the most recent checkpoint and discards it.
    fn rollback(&mut self);
}

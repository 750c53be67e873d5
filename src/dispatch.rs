//! Action dispatch seam
//!
//! Flows receive a dispatcher and emit their actions into it in order.
//! A `Vec` records everything it is given, which is what the CLI and the
//! tests use; [`FnDispatcher`] forwards to a closure.

/// Receiver of actions emitted by a flow
pub trait Dispatch<A> {
    fn dispatch(&mut self, action: A);
}

impl<A> Dispatch<A> for Vec<A> {
    fn dispatch(&mut self, action: A) {
        self.push(action);
    }
}

impl<A, D: Dispatch<A> + ?Sized> Dispatch<A> for &mut D {
    fn dispatch(&mut self, action: A) {
        (**self).dispatch(action);
    }
}

/// Adapter turning a closure into a dispatcher
pub struct FnDispatcher<F>(pub F);

impl<A, F: FnMut(A)> Dispatch<A> for FnDispatcher<F> {
    fn dispatch(&mut self, action: A) {
        (self.0)(action);
    }
}

//! Renderer collaborator
//!
//! The controller pushes finished values to a [`Renderer`]: a `DisplayModel` is
//! only handed over once parsing is complete, and the history is re-rendered
//! after every mutation.

pub mod text;

pub use text::TextRenderer;

use crate::models::{DisplayModel, QueryKind, SearchRecord};

pub trait Renderer {
    /// A search was submitted and is waiting on the transport
    fn render_loading(&mut self, kind: QueryKind, query: &str);

    fn render_result(&mut self, model: &DisplayModel);

    /// User-visible failure message (transport failures only)
    fn render_error(&mut self, message: &str);

    fn render_history(&mut self, history: &[SearchRecord]);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_loading(&mut self, kind: QueryKind, query: &str) {
        (**self).render_loading(kind, query)
    }

    fn render_result(&mut self, model: &DisplayModel) {
        (**self).render_result(model)
    }

    fn render_error(&mut self, message: &str) {
        (**self).render_error(message)
    }

    fn render_history(&mut self, history: &[SearchRecord]) {
        (**self).render_history(history)
    }
}

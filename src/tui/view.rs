use crate::models::{DisplayModel, QueryKind, SearchRecord};
use crate::render::Renderer;

/// What the result pane currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPane {
    #[default]
    Empty,
    Loading {
        kind: QueryKind,
        query: String,
    },
    Found(DisplayModel),
    Error(String),
}

/// Renderer target for the interactive UI; drawn on the next frame
#[derive(Debug, Default)]
pub struct TuiView {
    pub result: ResultPane,
    pub history: Vec<SearchRecord>,
    pub(super) dirty: bool,
}

impl TuiView {
    /// The displayed model, if the last search produced one
    pub fn model(&self) -> Option<&DisplayModel> {
        match &self.result {
            ResultPane::Found(model) => Some(model),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.result, ResultPane::Loading { .. })
    }
}

impl Renderer for TuiView {
    fn render_loading(&mut self, kind: QueryKind, query: &str) {
        self.result = ResultPane::Loading { kind, query: query.to_string() };
        self.dirty = true;
    }

    fn render_result(&mut self, model: &DisplayModel) {
        self.result = ResultPane::Found(model.clone());
        self.dirty = true;
    }

    fn render_error(&mut self, message: &str) {
        self.result = ResultPane::Error(message.to_string());
        self.dirty = true;
    }

    fn render_history(&mut self, history: &[SearchRecord]) {
        self.history = history.to_vec();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_tracks_latest_result() {
        let mut view = TuiView::default();
        view.render_loading(QueryKind::Scene, "pez dispenser");
        assert!(view.is_loading());

        let model = DisplayModel { summary: "The Pez Dispenser".into(), ..Default::default() };
        view.render_result(&model);
        assert_eq!(view.model(), Some(&model));
        assert!(view.dirty);

        view.render_error("down");
        assert!(view.model().is_none());
        assert_eq!(view.result, ResultPane::Error("down".into()));
    }
}

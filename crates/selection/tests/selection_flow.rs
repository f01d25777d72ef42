use context_graph::build_forest;
use context_records::RecordStore;
use context_selection::{SelectionChange, SelectionEngine, SelectionObserver, TriState};
use pretty_assertions::assert_eq;

const PAYLOAD: &str = r#"[
    {"id": 1, "name": "Novel", "type": "小说数据"},
    {"id": 2, "name": "Heroes", "parent_id": 1, "type": "人物设定"},
    {"id": 3, "name": "Places", "parent_id": 1, "type": "世界设定"},
    {"id": 4, "name": "Ada", "parent_id": 2, "type": "人物设定"},
    {"id": 5, "name": "Loose note"}
]"#;

#[derive(Default)]
struct Recorder {
    log: Vec<SelectionChange>,
}

impl SelectionObserver for Recorder {
    fn on_change(&mut self, change: &SelectionChange) {
        self.log.push(change.clone());
    }
}

#[test]
fn observer_sees_every_transition() {
    let (store, _) = RecordStore::from_json_str(PAYLOAD).unwrap();
    let forest = build_forest(&store);
    let mut engine = SelectionEngine::new();
    let mut recorder = Recorder::default();

    let mut batches = vec![engine.toggle(&forest, "2")];
    batches.push(engine.toggle(&forest, "5"));
    batches.push(engine.toggle(&forest, "4"));
    batches.push(engine.clear());
    for change in batches.iter().flatten() {
        recorder.on_change(change);
    }

    let rendered: Vec<String> = recorder
        .log
        .iter()
        .map(|c| format!("{}{}", if c.is_selected() { '+' } else { '-' }, c.id()))
        .collect();
    assert_eq!(rendered, vec!["+2", "+4", "+5", "-4", "-2", "-5"]);
}

#[test]
fn range_over_whole_forest_marks_parents_partial() {
    let (store, _) = RecordStore::from_json_str(PAYLOAD).unwrap();
    let forest = build_forest(&store);
    let order = forest.traversal_order(forest.entry().unwrap());
    let mut engine = SelectionEngine::new();

    engine.range_select(&forest, &order, "5", "1");

    assert_eq!(engine.len(), 5);
    assert_eq!(engine.tri_state(&forest, "1"), TriState::PartiallySelected);
    assert_eq!(engine.tri_state(&forest, "5"), TriState::Selected);
    assert_eq!(
        engine.tri_state(&forest, context_graph::SYNTHETIC_ROOT_ID),
        TriState::PartiallySelected
    );
}

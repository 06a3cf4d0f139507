use graphbar_core::{
    AddOutcome, GraphController, GraphRecord, GraphService, InputField, ListClickTarget,
    ManualClock, MemoryStore, MemorySurface, StoredGraphListRepository, ValidationError,
    WidgetConfig,
};

type TestController =
    GraphController<StoredGraphListRepository<MemoryStore>, MemorySurface, ManualClock>;

fn started() -> TestController {
    let service = GraphService::new(
        StoredGraphListRepository::new(MemoryStore::new()),
        MemorySurface::new(),
        ManualClock::new(0),
        &WidgetConfig::default(),
    );
    GraphController::start(service).unwrap()
}

fn type_inputs(controller: &mut TestController, name: &str, value: &str) {
    let surface = controller.service_mut().surface_mut();
    surface.type_input(InputField::Name, name);
    surface.type_input(InputField::Value, value);
}

#[test]
fn add_click_reads_inputs_from_surface() {
    let mut controller = started();
    type_inputs(&mut controller, "cpu", "50");

    let outcome = controller.on_add_clicked().unwrap();

    assert_eq!(outcome, Some(AddOutcome::Added));
    assert_eq!(controller.service().graphs(), &[GraphRecord::new("cpu", "50")]);
    let surface = controller.service().surface();
    assert_eq!(surface.input_value_of(InputField::Name), "");
    assert_eq!(surface.input_value_of(InputField::Value), "");
}

#[test]
fn add_click_reports_validation_failures() {
    let mut controller = started();
    type_inputs(&mut controller, "disk", "150");
    assert_eq!(
        controller.on_add_clicked().unwrap(),
        Some(AddOutcome::Rejected(vec![ValidationError::OutOfRange]))
    );
    assert!(controller.service().graphs().is_empty());
}

#[test]
fn add_click_is_ignored_while_read_only() {
    let mut controller = started();
    type_inputs(&mut controller, "cpu", "50");
    assert!(controller.on_read_only_clicked());

    assert_eq!(controller.on_add_clicked().unwrap(), None);
    assert!(controller.service().graphs().is_empty());

    assert!(!controller.on_read_only_clicked());
    assert_eq!(controller.on_add_clicked().unwrap(), Some(AddOutcome::Added));
}

#[test]
fn list_click_only_deletes_through_delete_button() {
    let mut controller = started();
    type_inputs(&mut controller, "cpu", "50");
    controller.on_add_clicked().unwrap();

    assert_eq!(controller.on_list_clicked(&ListClickTarget::Other).unwrap(), 0);
    assert_eq!(controller.service().graphs().len(), 1);

    let target = ListClickTarget::DeleteButton {
        row_name: "cpu".to_string(),
    };
    assert_eq!(controller.on_list_clicked(&target).unwrap(), 1);
    assert!(controller.service().graphs().is_empty());
}

#[test]
fn delete_works_in_read_only_mode() {
    let mut controller = started();
    type_inputs(&mut controller, "cpu", "50");
    controller.on_add_clicked().unwrap();
    controller.on_read_only_clicked();

    let target = ListClickTarget::DeleteButton {
        row_name: "cpu".to_string(),
    };
    assert_eq!(controller.on_list_clicked(&target).unwrap(), 1);
}

#[test]
fn timer_advances_notifications_and_reports_next_deadline() {
    let mut controller = started();
    type_inputs(&mut controller, "", "");
    controller.on_add_clicked().unwrap();
    assert_eq!(controller.service().surface().notifications().len(), 2);

    controller.service().clock().set(3_000);
    assert_eq!(controller.on_timer(), Some(4_000));
    assert!(controller
        .service()
        .surface()
        .notifications()
        .iter()
        .all(|shown| shown.hiding));

    controller.service().clock().set(4_000);
    assert_eq!(controller.on_timer(), None);
    assert!(controller.service().surface().notifications().is_empty());
}

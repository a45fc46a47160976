//! Schemas declared outside of the crate, with their own live types.
use kyute_model::{
    model, ApplyCtx, Data, ElementModel, Error, KindCategory, Model, ModelList, Prop, PropertyCategory,
};
use std::rc::Rc;

mod live {
    use kyute_model::ElementPtr;

    /// Only knows two of the three modes of the description.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    #[repr(u8)]
    pub enum Mode {
        #[default]
        Off = 0,
        On = 1,
    }

    impl TryFrom<u8> for Mode {
        type Error = u8;
        fn try_from(value: u8) -> Result<Self, u8> {
            match value {
                0 => Ok(Mode::Off),
                1 => Ok(Mode::On),
                other => Err(other),
            }
        }
    }

    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct Size {
        pub width: f32,
        pub height: f32,
    }

    impl Size {
        pub fn set_width(&mut self, width: f32) {
            self.width = width;
        }
        pub fn set_height(&mut self, height: f32) {
            self.height = height;
        }
    }

    #[derive(Debug, Default)]
    pub struct Widget {
        pub label: String,
        pub mode: Mode,
        /// Number of property writes.
        pub writes: usize,
    }

    impl Widget {
        pub fn set_label(&mut self, label: String) {
            self.label = label;
            self.writes += 1;
        }
        pub fn set_mode(&mut self, mode: Mode) {
            self.mode = mode;
            self.writes += 1;
        }
    }

    #[derive(Debug, Default)]
    pub struct Container {
        pub base: Widget,
        pub size: Size,
        pub items: Vec<ElementPtr>,
    }

    impl AsMut<Widget> for Container {
        fn as_mut(&mut self) -> &mut Widget {
            &mut self.base
        }
    }

    impl Container {
        pub fn set_size(&mut self, size: Size) {
            self.size = size;
        }
        pub fn items_mut(&mut self) -> &mut Vec<ElementPtr> {
            &mut self.items
        }
    }

    #[derive(Debug, Default)]
    pub struct Leaf {
        pub base: Widget,
        pub weight: i32,
        pub note: String,
    }

    impl AsMut<Widget> for Leaf {
        fn as_mut(&mut self) -> &mut Widget {
            &mut self.base
        }
    }

    impl Leaf {
        pub fn set_weight(&mut self, weight: i32) {
            self.weight = weight;
        }
        pub fn set_note(&mut self, note: String) {
            self.note = note;
        }
    }

    kyute_model::impl_element!(Widget, Container => Widget, Leaf => Widget);
}

model! {
    enum Item;

    enum Mode: u8 {
        Off = 0,
        On = 1,
        Blinking = 2,
    }

    abstract element Widget => live::Widget {
        label: String,
        mode: enum Mode,
    }

    element Container: Widget => live::Container {
        size: nested Size,
        /// Compared item by item.
        #[data(same_fn = "ModelList::same_items")]
        items: list Item,
    }

    element Leaf: Widget => live::Leaf {
        weight: i32,
        /// Not taken into account when comparing descriptions.
        #[data(ignore)]
        note: String,
    }

    value Size => live::Size {
        width: f32,
        height: f32,
    }
}

fn leaf(label: &str, weight: i32) -> Item {
    LeafModel::builder().label(label).weight(weight).into()
}

#[test]
fn unknown_enum_value_fails_conversion() {
    let mut cx = ApplyCtx::new();
    let result = LeafModel::builder().mode(ModeModel::Blinking).build().create(&mut cx);
    match result {
        Err(Error::Conversion { from, to, value }) => {
            assert_eq!(from, "Mode");
            assert!(to.ends_with("Mode"));
            assert_eq!(value, "2");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let element = LeafModel::builder().mode(ModeModel::On).build().create(&mut cx).unwrap();
    assert_eq!(element.borrow().base.mode, live::Mode::On);
}

#[test]
fn items_compared_by_value() {
    let mut cx = ApplyCtx::new();
    let build = || {
        ContainerModel::builder()
            .label("list")
            .items(vec![leaf("a", 1), leaf("b", 2)])
            .build()
    };
    let container = build().create(&mut cx).unwrap();
    let first = container.borrow().items[0].clone();

    // a new list with the same items is not a change
    build().apply(&mut cx, &container).unwrap();
    assert_eq!(cx.stats().skipped, 1);
    assert!(Rc::ptr_eq(&container.borrow().items[0], &first));

    ContainerModel::builder()
        .label("list")
        .items(vec![leaf("a", 1), leaf("b", 3)])
        .build()
        .apply(&mut cx, &container)
        .unwrap();
    let container = container.borrow();
    assert!(!Rc::ptr_eq(&container.items[0], &first));
    let weights: Vec<i32> = container
        .items
        .iter()
        .map(|item| item.downcast_ref::<live::Leaf>().unwrap().weight)
        .collect();
    assert_eq!(weights, [1, 3]);
    // the container changed, so the inherited label is written again
    assert_eq!(container.base.writes, 2);
}

#[test]
fn base_description_applies_to_derived_element() {
    let mut cx = ApplyCtx::new();
    let element = leaf("a", 1).create_element(&mut cx).unwrap();

    Item::from(WidgetModel::builder().label("b")).apply(&mut cx, &element).unwrap();
    let leaf = element.downcast_ref::<live::Leaf>().unwrap();
    assert_eq!(leaf.base.label, "b");
    assert_eq!(leaf.weight, 1);
}

#[test]
fn ignored_property_does_not_trigger_apply() {
    let mut cx = ApplyCtx::new();
    let element = LeafModel::builder().weight(1).note("first").build().create(&mut cx).unwrap();

    LeafModel::builder().weight(1).note("second").build().apply(&mut cx, &element).unwrap();
    assert_eq!(element.borrow().note, "first");

    LeafModel::builder().weight(2).note("third").build().apply(&mut cx, &element).unwrap();
    assert_eq!(element.borrow().note, "third");
    assert_eq!(element.borrow().weight, 2);
}

#[test]
fn nested_value_in_external_schema() {
    let mut cx = ApplyCtx::new();
    let container = ContainerModel::builder()
        .size(SizeModel::builder().width(10.0).height(20.0).build())
        .build()
        .create(&mut cx)
        .unwrap();
    assert_eq!(container.borrow().size, live::Size { width: 10.0, height: 20.0 });
    // the container and its size
    assert_eq!(cx.stats().created, 2);
}

#[test]
fn kind_introspection() {
    let leaf = LeafModel::KIND;
    let names: Vec<_> = leaf.ancestors().map(|k| k.name).collect();
    assert_eq!(names, ["Leaf", "Widget"]);
    assert!(leaf.is_a(WidgetModel::KIND));
    assert!(!WidgetModel::KIND.is_a(leaf));
    assert!(leaf.constructible);
    assert!(!WidgetModel::KIND.constructible);
    assert_eq!(SizeModel::KIND.category, KindCategory::Value);

    let all: Vec<_> = leaf.all_properties().iter().map(|p| p.name).collect();
    assert_eq!(all, ["label", "mode", "weight", "note"]);

    let container = ContainerModel::KIND;
    assert_eq!(
        container.property("mode").map(|p| p.category),
        Some(PropertyCategory::Enum { name: "Mode" })
    );
    assert_eq!(
        container.property("size").map(|p| p.category),
        Some(PropertyCategory::Nested { kind: "Size" })
    );
    assert_eq!(
        container.property("items").map(|p| p.category),
        Some(PropertyCategory::List { item: "Item" })
    );
    assert!(container.property("weight").is_none());

    let kinds: Vec<_> = Item::KINDS.iter().map(|k| k.name).collect();
    assert_eq!(kinds, ["Widget", "Container", "Leaf", "Size"]);
    assert_eq!(leaf.to_string(), "Leaf");
}

#[test]
fn to_builder_copies_the_description() {
    let original = LeafModel::builder().label("a").weight(1).build();
    let modified = original.to_builder().weight(2).build();

    assert_eq!(*original.weight(), Prop::Set(1));
    assert_eq!(*modified.weight(), Prop::Set(2));
    assert_eq!(*modified.label(), Prop::Set("a".to_string()));
    assert!(!original.same(&modified));
    assert!(original.same(&original.to_builder().build()));
    assert_eq!(*LeafModel::builder().build().weight(), Prop::Unset);
}

#[test]
fn node_data_compares_variants() {
    let a = leaf("a", 1);
    assert!(a.same(&leaf("a", 1)));
    assert!(!a.same(&leaf("a", 2)));
    assert!(!a.same(&Item::from(ContainerModel::builder().label("a"))));
    assert_eq!(a.kind().name, "Leaf");

    let list: ModelList<Item> = vec![a.clone()].into();
    assert!(ModelList::same_items(&list, &ModelList::from(vec![a])));
}

#[derive(Clone, Data)]
struct Counter {
    id: u32,
    #[data(ignore)]
    reads: usize,
    #[data(same_fn = "same_len")]
    name: String,
}

fn same_len(a: &String, b: &String) -> bool {
    a.len() == b.len()
}

#[derive(Clone, Data)]
enum Event {
    Click { x: i32, y: i32 },
    Key(char),
    Close,
}

#[test]
fn derived_data() {
    let counter = Counter {
        id: 1,
        reads: 0,
        name: "abc".to_string(),
    };
    assert!(counter.same(&Counter {
        reads: 12,
        ..counter.clone()
    }));
    assert!(counter.same(&Counter {
        name: "xyz".to_string(),
        ..counter.clone()
    }));
    assert!(!counter.same(&Counter {
        id: 2,
        ..counter.clone()
    }));

    assert!(Event::Click { x: 1, y: 2 }.same(&Event::Click { x: 1, y: 2 }));
    assert!(!Event::Click { x: 1, y: 2 }.same(&Event::Click { x: 1, y: 3 }));
    assert!(Event::Key('a').same(&Event::Key('a')));
    assert!(!Event::Key('a').same(&Event::Close));
    assert!(Event::Close.same(&Event::Close));
}

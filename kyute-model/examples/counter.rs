//! A counter page, rebuilt from scratch on every click and reconciled onto the same live tree.
use kyute_model::{
    controls::{self, Color, Command},
    models::*,
    ApplyCtx, ElementModel, ModelList,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct MainPage {
    count: Arc<AtomicUsize>,
    // created once, so that the button isn't considered changed on every rebuild
    increment: Command,
}

impl MainPage {
    fn new() -> MainPage {
        let count = Arc::new(AtomicUsize::new(0));
        let increment = {
            let count = count.clone();
            Command::new(move || {
                count.fetch_add(1, Ordering::Relaxed);
            })
        };
        MainPage { count, increment }
    }

    fn build(&self) -> StackPanelModel {
        let count = self.count.load(Ordering::Relaxed);
        let children: ModelList<Node> = vec![
            TextBlockModel::builder()
                .text(count.to_string())
                .font_size(24.0)
                .foreground(SolidColorBrushModel::new(Color::BLACK))
                .into(),
            ButtonModel::builder()
                .content("Increment".to_string())
                .command(self.increment.clone())
                .into(),
        ]
        .into();

        StackPanelModel::builder()
            .padding(ThicknessModel::uniform(42.0))
            .spacing(8.0)
            .tag(count.to_string())
            .children(children)
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_tree::HierarchicalLayer::new(2).with_targets(false))
        .with(EnvFilter::from_default_env())
        .init();

    let page = MainPage::new();
    let mut cx = ApplyCtx::new();
    let content = page.build().create(&mut cx)?;
    info!(stats = ?cx.take_stats(), "page created");

    for _ in 0..3 {
        // simulate a click on the button
        let button = content.borrow().children()[1].clone();
        let clicked = button
            .downcast_ref::<controls::Button>()
            .map_or(false, |button| button.click());
        anyhow::ensure!(clicked, "the button has no command");

        page.build().apply(&mut cx, &content)?;
        let panel = content.borrow();
        let label = panel.children()[0]
            .downcast_ref::<controls::TextBlock>()
            .map(|text| text.text().to_string());
        info!(tag = panel.tag(), ?label, stats = ?cx.take_stats(), "page updated");
    }

    Ok(())
}

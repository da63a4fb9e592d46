use wrap_balancer::component::{Balancer, BalancerProps, Content, IdGenerator};
use wrap_balancer::layout::{LayoutDocument, Padding, TextStyle};
use wrap_balancer::markup::relayout_script;
use wrap_balancer::{deliver_resize_notifications, install, invoke_by_id, Config, LayoutHost, Px};

fn print_lines(doc: &LayoutDocument, wrapper: wrap_balancer::layout::ElementId) {
    for line in doc.lines(wrapper) {
        println!("  | {:<60} | {}", line.text, line.width);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::default();
    let headline = lipsum::lipsum_words(14);

    // render the page on the "server"
    let mut ids = IdGenerator::new();
    let id = ids.next_id();
    let mut props = BalancerProps::new();
    props.tag("span").ratio(1.0).child(Content::text(&headline));
    println!("{}", relayout_script(&config));
    println!("<h1>{}</h1>\n", props.render_to_string(&id, &config));

    // build the same page in the in-memory layout engine
    let mut doc = LayoutDocument::new();
    let container = doc.add_container(Px(480.0), Padding::symmetric(Px(8.0), Px(16.0)));
    let wrapper = doc
        .add_wrapper(container, &headline, TextStyle::monospace(Px(9.0), Px(22.0)))
        .unwrap();
    doc.set_attribute(wrapper, &config.id_attribute, &id);
    doc.set_attribute(wrapper, &config.ratio_attribute, "1");

    println!("greedy wrapping at 480px:");
    print_lines(&doc, wrapper);

    // the inline script runs before the application, then the application installs the
    // entry point and hydrates
    invoke_by_id(&mut doc, &id, 1.0);
    install(&mut doc, config.clone());
    let balancer = Balancer::hydrate(&mut doc, &id, 1.0, config);

    println!("\nbalanced (max-width {:?}):", doc.max_width(wrapper).map(Px::to_css));
    print_lines(&doc, wrapper);

    doc.resize(container, Px(360.0)).unwrap();
    deliver_resize_notifications(&mut doc);
    println!(
        "\nafter resizing to 360px (max-width {:?}):",
        doc.max_width(wrapper).map(Px::to_css)
    );
    print_lines(&doc, wrapper);

    balancer.unmount(&mut doc);
}

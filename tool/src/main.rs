mod config;

use {
    anthropometry::{
        picking::{BodyMode, Control, Tool},
        render::{draw_picking, draw_skeleton, DrawList},
        Segmentation, Selection, Session,
    },
    color_eyre::Report,
    ik::PickColor,
    tracing_subscriber::{prelude::*, EnvFilter},
    ultraviolet::Vec2,
};

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    install_tracing()?;

    let path = anthropometry::Config::default_path();
    let config: config::Config =
        anthropometry::config::load_ron_or_default(&path)?;

    let mut session = Session::new(&config.engine)?;

    for &target in &config.tool.effector_path {
        session.set_effector_position(target.into());
        if session.tick() {
            let joints: Vec<_> = session
                .chain()
                .joints()
                .iter()
                .map(|&id| session.skeleton().position(id))
                .collect();
            tracing::info!("Chain solved towards {:?}: {:?}", target, joints);
        }
    }

    session.select_by_color(Control::Tool(Tool::PlaneSlice).color());
    for &[x, y] in &config.tool.clicks {
        if let Selection::Added(bone) =
            session.click(Vec2::new(x, y), PickColor::BLACK)
        {
            tracing::info!(
                "Bone {:?} added at {:?}",
                bone,
                session.skeleton().position(bone)
            );
        }
    }

    let mut list = DrawList::new();
    draw_skeleton(session.skeleton(), &mut list);
    draw_picking(session.skeleton(), &mut list);
    tracing::info!(
        "Skeleton of {} bones drawn with {} commands",
        session.skeleton().len(),
        list.commands.len()
    );

    let mesh = config.tool.mesh.build()?;
    let segmentation =
        Segmentation::with_config(&mesh, &config.engine.segmentation)?;

    session.select_by_color(Control::Body(BodyMode::Features).color());
    let colors = session.view().body_colors(&mesh, Some(&segmentation));

    let boundary = segmentation
        .features
        .values()
        .iter()
        .filter(|&&value| value > 0.0)
        .count();

    tracing::info!(
        "{} vertices, {} patches, {} boundary vertices, {} colors",
        mesh.vertex_count(),
        segmentation.patch_count(),
        boundary,
        colors.len()
    );

    Ok(())
}

fn install_tracing() -> Result<(), Report> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}

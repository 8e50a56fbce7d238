//! Compositor hot-path benchmark: a few layers into a 1024x1024 atlas,
//! the shape of one interactive edit tick.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use garment_studio::{Compositor, Design, TransformUpdate, UvTemplate};
use image::{Rgba, RgbaImage};
use std::sync::Arc;

fn gradient_image(size: u32) -> Arc<RgbaImage> {
    let image = RgbaImage::from_fn(size, size, |x, y| {
        let u = (x * 255 / size.max(1)) as u8;
        let v = (y * 255 / size.max(1)) as u8;
        Rgba([u, v, 128, 200])
    });
    Arc::new(image)
}

fn bench_composite(c: &mut Criterion) {
    let template = UvTemplate::placeholder(1024, 1024);
    let mut design = Design::new();
    design.set_garment_color([220, 220, 220]);
    for i in 0..3 {
        let index = design.add_layer(gradient_image(512), format!("layer{i}.png"));
        design
            .set_transform(
                index,
                TransformUpdate {
                    x: Some(0.05 * i as f32),
                    scale: Some(0.5),
                    rotation: Some(15.0 * i as f32),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    let compositor = Compositor::new();

    c.bench_function("composite_1024_3_layers", |b| {
        b.iter(|| black_box(compositor.composite(&design, &template)))
    });

    c.bench_function("flatten_1024", |b| {
        let output = compositor.composite(&design, &template);
        b.iter(|| black_box(output.flatten()))
    });
}

criterion_group!(benches, bench_composite);
criterion_main!(benches);

use std::sync::Arc;
use std::thread;

use nodal_mapper::{Format, Mapper, Options};
use nodal_model::Reflect;
use nodal_model::cache::TypeCache;

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Sample {
    id: u32,
    labels: Vec<String>,
    origin: Option<Origin>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Origin {
    host: String,
    port: u16,
}

fn sample(id: u32) -> Sample {
    Sample {
        id,
        labels: vec![format!("l{id}")],
        origin: Some(Origin {
            host: format!("h{id}"),
            port: 8080,
        }),
    }
}

#[test]
fn concurrent_calls_share_one_cache() {
    let cache = Arc::new(TypeCache::new());
    let mapper = Mapper::with_cache(cache.clone());
    let options = Options::builder().ignore_case(true).build();

    thread::scope(|scope| {
        for worker in 0..8_u32 {
            let mapper = &mapper;
            let options = &options;
            scope.spawn(move || {
                for round in 0..16 {
                    let value = sample(worker * 100 + round);
                    let format = if round % 2 == 0 { Format::Json } else { Format::Xml };
                    let node = mapper.serialize(&value, format, options).unwrap();
                    let back: Sample = mapper.deserialize(&*node, options).unwrap();
                    assert_eq!(back, value);
                }
            });
        }
    });

    let len = cache.len();
    assert!(len > 0);
    mapper.serialize(&sample(1), Format::Json, &options).unwrap();
    assert_eq!(cache.len(), len);
}

#[test]
fn clones_share_the_cache() {
    let mapper = Mapper::with_cache(Arc::new(TypeCache::new()));
    let clone = mapper.clone();
    assert!(Arc::ptr_eq(mapper.cache(), clone.cache()));
    assert!(Arc::ptr_eq(Mapper::new().cache(), &TypeCache::global()));
}

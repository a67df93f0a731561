//! Sample device catalogue used by the CLI.

use tracing::instrument;

use crate::arena::{NodeId, TreeArena};
use crate::errors::TreeResult;

/// A tree together with the id of its root.
#[derive(Debug)]
pub struct Catalogue {
    pub tree: TreeArena<&'static str>,
    pub root: NodeId,
}

/// Builds the device hierarchy top-down, so cached depths are exact.
///
/// Devices, Smartphone, IOS, Iphone, Android and TV start open; PC and
/// Wearable are closed leaves.
#[instrument(level = "debug")]
pub fn device_catalogue() -> TreeResult<Catalogue> {
    let mut tree = TreeArena::new();

    let devices = tree.insert_expandable("Devices");

    let smartphone = tree.insert_expandable("Smartphone");
    let ios = tree.insert_expandable("IOS");
    let android = tree.insert_expandable("Android");

    let iphone = tree.insert_expandable("Iphone");
    let apple_watch = tree.insert_expandable("Apple Watch");
    let tvos = tree.insert_expandable("TVOS");

    let iphone_4s = tree.insert_expandable("Iphone 4s");
    let iphone_5s = tree.insert_expandable("Iphone 5s");
    let iphone_7 = tree.insert_expandable("Iphone 7");

    let nexus = tree.insert_expandable("Nexus");
    let samsung = tree.insert_expandable("Samsung");
    let huawei = tree.insert_expandable("Huawei");

    let pc = tree.insert_expandable("PC");
    let wearable = tree.insert_expandable("Wearable");
    let tv = tree.insert_expandable("TV");

    let bravia = tree.insert_expandable("Bravia");
    let trinitron = tree.insert_expandable("Trinitron");

    tree.attach_all(devices, [smartphone, pc, wearable, tv])?;
    tree.attach_all(smartphone, [ios, android])?;
    tree.attach_all(ios, [iphone, apple_watch, tvos])?;
    tree.attach_all(iphone, [iphone_4s, iphone_5s, iphone_7])?;
    tree.attach_all(android, [nexus, samsung, huawei])?;
    tree.attach_all(tv, [bravia, trinitron])?;

    for id in [devices, ios, iphone, android, smartphone, tv] {
        tree.set_open(id, true)?;
    }

    Ok(Catalogue {
        tree,
        root: devices,
    })
}

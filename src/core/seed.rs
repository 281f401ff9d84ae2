use super::model::{now_iso, Collection, InventoryItem, ItemAttribute, StorageBox};

fn item(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    quantity: u32,
    attributes: &[(&str, &str)],
    added_at: &str,
) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        quantity,
        attributes: attributes
            .iter()
            .map(|(key, value)| ItemAttribute::new(*key, *value))
            .collect(),
        added_at: added_at.to_string(),
    }
}

fn storage_box(
    id: &str,
    name: &str,
    location: &str,
    color: &str,
    items: Vec<InventoryItem>,
) -> StorageBox {
    StorageBox {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        color: Some(color.to_string()),
        items,
    }
}

/// Built-in boxes written on first run, or served when stored data is corrupt.
pub fn seed_collection() -> Collection {
    let added_at = now_iso();
    vec![
        storage_box(
            "box-001",
            "杂项电子",
            "A-2 货架",
            "bg-blue-100",
            vec![
                item(
                    "item-1",
                    "罗技 MX Master 3",
                    "无线鼠标，握把处有轻微磨损。",
                    "电子产品",
                    1,
                    &[
                        ("类型", "鼠标"),
                        ("连接方式", "蓝牙/USB-C"),
                        ("电池", "可充电锂电池"),
                    ],
                    &added_at,
                ),
                item(
                    "item-2",
                    "HDMI 线缆",
                    "各种长度，主要是 1.8米。",
                    "线缆",
                    3,
                    &[("长度", "1.8米"), ("类型", "HDMI 2.0")],
                    &added_at,
                ),
            ],
        ),
        storage_box(
            "box-002",
            "露营装备",
            "车库 1号架",
            "bg-green-100",
            vec![item(
                "item-3",
                "头灯",
                "Black Diamond Storm 400",
                "户外",
                2,
                &[
                    ("流明", "400"),
                    ("电池类型", "4节 AAA"),
                    ("防水等级", "IP67"),
                ],
                &added_at,
            )],
        ),
        storage_box("box-003", "节日装饰", "阁楼", "bg-red-100", Vec::new()),
    ]
}

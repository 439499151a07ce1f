//! Built-in catalog fixtures used for seeding. Prices are INR.

use chrono::Utc;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::entities::product;

/// The full seed catalog. Ids are stable so reseeding keeps cart and order
/// references meaningful.
pub fn products() -> Vec<product::Model> {
    let now = Utc::now();
    let entry = |id: i32,
                 name: &str,
                 price,
                 image: &str,
                 category: &str,
                 product_type: &str,
                 brand: &str,
                 rating: f64,
                 reviews: i32,
                 description: &str,
                 specifications: serde_json::Value,
                 shipping: serde_json::Value,
                 offers: serde_json::Value| product::Model {
        id,
        name: name.to_string(),
        price,
        image: image.to_string(),
        category: category.to_string(),
        product_type: product_type.to_string(),
        brand: Some(brand.to_string()),
        rating,
        reviews,
        in_stock: true,
        description: description.to_string(),
        specifications,
        shipping,
        offers,
        created_at: now,
        updated_at: now,
    };

    vec![
        entry(
            1,
            "Sony WH-1000XM5 Wireless Headphones",
            dec!(29990),
            "/black-headphones-pink_94046-1948.webp",
            "Electronics",
            "Audio",
            "Sony",
            4.8,
            245,
            "Industry-leading noise cancellation with premium sound quality. 30-hour battery life with quick charging support.",
            json!({
                "brand": "Sony",
                "model": "WH-1000XM5",
                "connectivity": "Bluetooth 5.2, 3.5mm Jack",
                "batteryLife": "30 hours",
                "noiseCancellation": "Active Noise Cancellation",
                "weight": "250g",
                "color": "Black"
            }),
            json!({
                "estimatedDelivery": "3-5 business days",
                "charges": 0,
                "returnPolicy": "30-day return policy"
            }),
            json!([
                "10% instant discount with HDFC Credit Card",
                "No-cost EMI available",
                "Free delivery"
            ]),
        ),
        entry(
            2,
            "Apple Watch Series 9 GPS 41mm",
            dec!(41900),
            "/apple-watch-sport-42mm-silver-aluminum-case-with-black-band.webp",
            "Electronics",
            "Wearables",
            "Apple",
            4.9,
            892,
            "Advanced health and fitness tracking. Always-on Retina display with S9 chip for peak performance.",
            json!({
                "brand": "Apple",
                "model": "Series 9",
                "display": "1.9\" Retina LTPO OLED",
                "processor": "S9 SiP",
                "storage": "32GB",
                "waterResistance": "50m",
                "batteryLife": "18 hours"
            }),
            json!({
                "estimatedDelivery": "2-4 business days",
                "charges": 0,
                "returnPolicy": "14-day return policy"
            }),
            json!([
                "5% cashback on Amazon Pay ICICI Card",
                "Free engraving",
                "1-year warranty included"
            ]),
        ),
        entry(
            3,
            "Anker USB-C to Lightning Cable (6ft)",
            dec!(1299),
            "/usb-c-3-0-data-100w-pd-with-1000m-ethernet-rj45-multiport-original-imahap4hvqwyvhfj.webp",
            "Accessories",
            "Cables",
            "Anker",
            4.5,
            1560,
            "MFi certified fast charging cable. Durable braided design with 10000+ bend lifespan.",
            json!({
                "brand": "Anker",
                "model": "PowerLine II",
                "length": "6ft / 1.8m",
                "connector": "USB-C to Lightning",
                "certification": "MFi Certified",
                "color": "Black",
                "warranty": "Lifetime warranty"
            }),
            json!({
                "estimatedDelivery": "2-3 business days",
                "charges": 0,
                "returnPolicy": "30-day return policy"
            }),
            json!(["Buy 2 Get 10% off", "Free delivery"]),
        ),
        entry(
            4,
            "Dell Inspiron 15 Laptop (i5, 8GB, 512GB SSD)",
            dec!(52990),
            "/61DcTof0gkL.webp",
            "Electronics",
            "Laptops",
            "Dell",
            4.4,
            543,
            "15.6\" FHD display with 11th Gen Intel Core i5 processor. Perfect for work and entertainment.",
            json!({
                "brand": "Dell",
                "model": "Inspiron 15 3511",
                "processor": "Intel Core i5-1135G7",
                "ram": "8GB DDR4",
                "storage": "512GB SSD",
                "display": "15.6\" FHD",
                "graphics": "Intel Iris Xe"
            }),
            json!({
                "estimatedDelivery": "3-5 business days",
                "charges": 0,
                "returnPolicy": "10-day return policy"
            }),
            json!([
                "₹2000 instant discount with ICICI Cards",
                "No-cost EMI available",
                "1-year warranty"
            ]),
        ),
        entry(
            5,
            "Anker PowerCore 20000mAh Power Bank",
            dec!(2999),
            "/eng_pl_Baseus-Free2Pull-10000mAh-30W-powerbank-with-USB-C-port-and-retractable-USB-C-cable-black-168911_4_533x.webp",
            "Accessories",
            "Power Banks",
            "Anker",
            4.6,
            724,
            "Ultra-high-capacity portable charger with dual USB ports. Fast charging support.",
            json!({
                "brand": "Anker",
                "model": "PowerCore 20K",
                "capacity": "20000mAh",
                "output": "Dual USB (2.4A each)",
                "input": "Micro USB / USB-C",
                "weight": "356g",
                "rechargeTime": "10 hours"
            }),
            json!({
                "estimatedDelivery": "2-3 business days",
                "charges": 0,
                "returnPolicy": "18-month warranty"
            }),
            json!([
                "10% off on prepaid orders",
                "Free delivery",
                "Exchange offer available"
            ]),
        ),
        entry(
            6,
            "JBL Flip 6 Portable Bluetooth Speaker",
            dec!(9999),
            "/portable-bluetooth-speaker-with-silicone-handle-isolated-on-white-background.webp",
            "Electronics",
            "Audio",
            "JBL",
            4.7,
            438,
            "Waterproof portable speaker with powerful sound. 12-hour playtime with deep bass.",
            json!({
                "brand": "JBL",
                "model": "Flip 6",
                "bluetooth": "Bluetooth 5.1",
                "batteryLife": "12 hours",
                "waterproof": "IP67",
                "weight": "550g",
                "output": "30W"
            }),
            json!({
                "estimatedDelivery": "2-4 business days",
                "charges": 0,
                "returnPolicy": "30-day return policy"
            }),
            json!([
                "15% cashback on Amazon Pay",
                "Free carrying case",
                "No-cost EMI for 3 months"
            ]),
        ),
        entry(
            7,
            "Lamicall Adjustable Phone Stand",
            dec!(599),
            "/apple-watch-sport-42mm-silver-aluminum-case-with-black-band.webp",
            "Accessories",
            "Phone Accessories",
            "Lamicall",
            4.4,
            267,
            "Multi-angle aluminum phone stand for desk. Compatible with all smartphones and tablets.",
            json!({
                "brand": "Lamicall",
                "model": "S1",
                "material": "Aluminum alloy",
                "compatibility": "4-13 inch devices",
                "adjustableAngles": "Yes",
                "weight": "180g",
                "color": "Silver"
            }),
            json!({
                "estimatedDelivery": "3-4 business days",
                "charges": 0,
                "returnPolicy": "30-day return policy"
            }),
            json!(["Buy 2 Get 15% off", "Free delivery"]),
        ),
        entry(
            8,
            "Logitech MX Master 3S Wireless Mouse",
            dec!(8999),
            "/usb-c-3-0-data-100w-pd-with-1000m-ethernet-rj45-multiport-original-imahap4hvqwyvhfj.webp",
            "Electronics",
            "Computer Accessories",
            "Logitech",
            4.8,
            1243,
            "Advanced wireless mouse with ultra-fast scrolling. Ergonomic design for productivity.",
            json!({
                "brand": "Logitech",
                "model": "MX Master 3S",
                "connectivity": "Bluetooth, USB Receiver",
                "sensor": "8000 DPI",
                "batteryLife": "70 days",
                "buttons": "7 programmable",
                "weight": "141g"
            }),
            json!({
                "estimatedDelivery": "2-3 business days",
                "charges": 0,
                "returnPolicy": "30-day return policy"
            }),
            json!([
                "10% instant discount with bank cards",
                "Free delivery",
                "1-year warranty"
            ]),
        ),
        entry(
            9,
            "OnePlus Nord CE 3 Lite 5G (8GB, 128GB)",
            dec!(19999),
            "/61DcTof0gkL.webp",
            "Electronics",
            "Smartphones",
            "OnePlus",
            4.3,
            534,
            "6.72\" FHD+ display with 108MP camera. Snapdragon 695 5G processor for smooth performance.",
            json!({
                "brand": "OnePlus",
                "model": "Nord CE 3 Lite",
                "display": "6.72\" FHD+ 120Hz",
                "processor": "Snapdragon 695",
                "ram": "8GB",
                "storage": "128GB",
                "camera": "108MP + 2MP + 2MP"
            }),
            json!({
                "estimatedDelivery": "2-3 business days",
                "charges": 0,
                "returnPolicy": "10-day replacement"
            }),
            json!([
                "Exchange offer up to ₹15,000",
                "No-cost EMI available",
                "1-year warranty"
            ]),
        ),
        entry(
            10,
            "Logitech C920 HD Pro Webcam",
            dec!(6499),
            "/portable-bluetooth-speaker-with-silicone-handle-isolated-on-white-background.webp",
            "Electronics",
            "Computer Accessories",
            "Logitech",
            4.5,
            892,
            "Full HD 1080p webcam with auto-focus. Built-in stereo microphones for clear audio.",
            json!({
                "brand": "Logitech",
                "model": "C920",
                "resolution": "1080p at 30fps",
                "fieldOfView": "78 degrees",
                "autofocus": "Yes",
                "microphone": "Dual stereo",
                "mounting": "Universal clip"
            }),
            json!({
                "estimatedDelivery": "3-5 business days",
                "charges": 0,
                "returnPolicy": "30-day return policy"
            }),
            json!([
                "15% off on prepaid orders",
                "Free tripod stand worth ₹499",
                "Free shipping"
            ]),
        ),
        entry(
            11,
            "boAt Airdopes 131 TWS Earbuds",
            dec!(1299),
            "/black-headphones-pink_94046-1948.webp",
            "Electronics",
            "Audio",
            "boAt",
            4.1,
            8456,
            "True wireless earbuds with 60-hour playback. IPX4 water resistant with BEAST mode for gaming.",
            json!({
                "brand": "boAt",
                "model": "Airdopes 131",
                "bluetooth": "Bluetooth 5.3",
                "playback": "60 hours",
                "waterResistance": "IPX4",
                "charging": "Type-C fast charging",
                "driver": "13mm"
            }),
            json!({
                "estimatedDelivery": "2-3 business days",
                "charges": 0,
                "returnPolicy": "7-day replacement"
            }),
            json!([
                "10% instant discount on HDFC Cards",
                "Free delivery",
                "1-year warranty"
            ]),
        ),
        entry(
            12,
            "Samsung Galaxy M14 5G (6GB, 128GB)",
            dec!(13990),
            "/eng_pl_Baseus-Free2Pull-10000mAh-30W-powerbank-with-USB-C-port-and-retractable-USB-C-cable-black-168911_4_533x.webp",
            "Electronics",
            "Smartphones",
            "Samsung",
            4.2,
            1567,
            "6.6\" FHD+ display with 50MP triple camera. 6000mAh battery with Exynos 1330 processor.",
            json!({
                "brand": "Samsung",
                "model": "Galaxy M14 5G",
                "display": "6.6\" FHD+ 90Hz",
                "processor": "Exynos 1330",
                "ram": "6GB",
                "storage": "128GB",
                "camera": "50MP + 2MP + 2MP",
                "battery": "6000mAh"
            }),
            json!({
                "estimatedDelivery": "2-3 business days",
                "charges": 0,
                "returnPolicy": "10-day replacement"
            }),
            json!([
                "Exchange offer up to ₹10,500",
                "No-cost EMI available",
                "1-year warranty"
            ]),
        ),
    ]
}

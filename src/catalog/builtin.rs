//! The tool catalog shipped with the server.
//!
//! Order matters: categories and tools are listed in display order.

use super::descriptors::{CategoryDescriptor, Icon, ToolDescriptor, ToolStatus::*};

#[rustfmt::skip]
const DEV_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor::new("JSON 格式化", "美化、压缩、校验 JSON 数据", Icon::FileJson, "/json-formatter", Developed),
    ToolDescriptor::new("时间戳转换", "Unix 时间戳与日期互相转换", Icon::Clock, "/timestamp", Developed),
    ToolDescriptor::new("Base64 编解码", "文本/图片 Base64 转换", Icon::Binary, "/base64", Developed),
    ToolDescriptor::new("UUID 生成器", "批量生成 Version 1/4 UUID", Icon::Fingerprint, "/uuid", Developed),
    ToolDescriptor::new("正则测试", "正则表达式实时测试", Icon::Regex, "/regex", Developed),
    ToolDescriptor::new("URL 编解码", "URL 参数 Encode/Decode", Icon::Link, "/url-encode", Developed),
];

#[rustfmt::skip]
const TEXT_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor::new("字数统计", "统计汉字、单词、字符数", Icon::AlignLeft, "/word-count", Developed),
    ToolDescriptor::new("文本 Diff", "两段文本差异对比", Icon::ArrowLeftRight, "/diff", Developed),
    ToolDescriptor::new("密码生成", "随机生成强密码", Icon::KeyRound, "/password-gen", Developed),
    ToolDescriptor::new("命名转换", "驼峰、下划线等风格转换", Icon::CaseUpper, "/case-converter", Developed),
];

#[rustfmt::skip]
const IMAGE_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor::new("二维码生成", "文本/链接生成二维码", Icon::QrCode, "/qrcode", Developed),
    ToolDescriptor::new("颜色转换", "HEX, RGB, HSL 互转", Icon::Palette, "/color", Developed),
    ToolDescriptor::new("图片压缩", "本地图片压缩减小体积", Icon::Minimize, "/image-compress", Developed),
];

#[rustfmt::skip]
const LIFE_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor::new("单位换算", "常用物理单位换算", Icon::Calculator, "/unit", Developed)
        .with_route_name("unit-converter"),
    ToolDescriptor::new("番茄钟", "专注工作倒计时", Icon::Clock, "/pomodoro", Planned),
    ToolDescriptor::new("待办清单", "简单的本地 Todo List", Icon::ListTodo, "/todo", Planned),
    ToolDescriptor::new("决策转盘", "随机选择与随机数", Icon::Dices, "/random", Planned),
];

pub const BUILTIN_CATEGORIES: &[CategoryDescriptor] = &[
    CategoryDescriptor {
        title: "开发者工具",
        id: "dev-tools",
        icon: Icon::Code2,
        color: "text-blue-600",
        background: "bg-blue-50",
        tools: DEV_TOOLS,
    },
    CategoryDescriptor {
        title: "文本与数据",
        id: "text-tools",
        icon: Icon::Type,
        color: "text-emerald-600",
        background: "bg-emerald-50",
        tools: TEXT_TOOLS,
    },
    CategoryDescriptor {
        title: "图形与设计",
        id: "image-tools",
        icon: Icon::Image,
        color: "text-purple-600",
        background: "bg-purple-50",
        tools: IMAGE_TOOLS,
    },
    CategoryDescriptor {
        title: "生活与效率",
        id: "life-tools",
        icon: Icon::Clock,
        color: "text-orange-600",
        background: "bg-orange-50",
        tools: LIFE_TOOLS,
    },
];

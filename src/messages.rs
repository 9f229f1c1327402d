use rand::Rng;
use rand::seq::SliceRandom;

pub const SUCCESS_MESSAGES: &[&str] = &[
    "闯关完成，欢迎回来！",
    "干得漂亮！继续保持！",
    "太棒了，继续冲锋！",
    "大地母亲守护着你！",
    "愿风指引你的道路，勇士！",
    "为了艾泽拉斯！",
    "荣耀属于你！",
    "胜利属于勇敢者！",
    "继续高歌猛进！",
    "你就是今天的主角！",
    "愿圣光与你同在！",
    "艾露恩保佑你！",
    "荣耀与力量！",
    "为了联盟！",
    "为了部落！",
    "下一关也拿下！",
    "胜利或死亡！（当然是胜利）",
    "力量与智慧同在！",
    "继续前进，英雄！",
    "你的努力正在发光！",
    "今日无惧，明日无敌！",
    "前路畅通无阻！",
    "强者从不止步！",
];

pub const FAILURE_MESSAGES: &[&str] = &[
    "闯关失败~再接再厉！",
    "不要气馁，再试一次！",
    "失败乃成功之母！",
    "你这是自寻死路！",
    "炎魔之王得到火焰会净化一切！",
    "你还没准备好！",
    "勇士，重新整顿再来！",
    "再努力一点点就成功了！",
    "坚持住，胜利就在前方！",
    "现在还不是时候……",
    "重整旗鼓再战！",
    "别灰心，下一次更好！",
    "再来一次，这次会更好！",
    "失败不可怕，放弃才可怕！",
    "勇士，回去训练一下吧！",
    "风暴将至，迎难而上！",
    "失败只是起点，不是终点！",
    "每一次尝试都很重要！",
    "从失败中学习就是胜利的一半！",
    "休整一下，立刻反击！",
    "系统关闭..闭...闭....",
    "为了..奎尔...萨拉斯...",
    "我还不能...",
];

/// Encouragement shown under the title on the main menu.
pub const SOUPS: &[&str] = &[
    "每天学一点，你就比昨天的自己更厉害！",
    "好奇心是通往知识宝藏的第一把钥匙。",
    "读一本书，就像交了一个新朋友。",
    "错误是帮助我们进步的“小老师”。",
    "知识就像超能力，学习就是你的训练场。",
    "学习是给自己的最好礼物。",
    "勇敢不是不害怕，而是害怕也愿意去试试。",
    "慢慢来，进步的小脚印最踏实。",
    "今天的“我不会”，就是明天的“我学会”！",
    "坚持下去，美好的事情正在发生。",
    "不用和别人比，你的对手是昨天的自己。",
    "善良是一种超级力量，你拥有它。",
    "分享快乐，快乐就会变成双倍。",
    "团结合作，我们能创造奇迹。",
    "心怀梦想，未来可期。",
    "你的未来，由每一个今天的你创造。",
    "保持微笑，好运正在路上。",
    "今天又是崭新的一天，充满新的希望！",
    "做最棒的自己，就是最大的成功。",
    "记住，你永远被爱着，也被期待着。",
];

pub const WELCOME: &str = "欢迎回来！";
pub const WELCOME_PARENT: &str = "欢迎使用爸爸的爱";
pub const WELCOME_SON: &str = "你已经进入儿子模式！";

pub fn pick<R: Rng>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn pick_comes_from_pool() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..20 {
            assert!(SUCCESS_MESSAGES.contains(&pick(SUCCESS_MESSAGES, &mut rng)));
        }
        assert_eq!(pick(&[], &mut rng), "");
    }
}

//! Fixed reply content: greetings, the apology, and the keyword-matched
//! fallback replies used when no API key is available.

/// Greeting seeded into a fresh log when a credential is present.
pub const GREETING: &str = "嘿！我是小林同学，你的商业参谋。关于《富老板》，有什么想聊的吗？";

/// Greeting seeded into a fresh log when no credential is present.
pub const GREETING_NO_KEY: &str = r#"⚙️ **需要设置 API Key**

请点击右上角的设置按钮（齿轮图标），输入你的 Google Gemini API Key 来激活真正的 AI 对话功能。

**获取 API Key：** https://aistudio.google.com/

在没有 API Key 的情况下，我只能提供预设的回复。"#;

/// Shown as the assistant reply when the remote call fails for any reason.
pub const APOLOGY: &str = "抱歉，我遇到了一些问题。请检查你的 API Key 是否正确，或稍后再试。";

const RICH_BOSS_REPLY: &str = r#"关于"富老板思维"，让我来拆解一下：

**第一点，资产思维** — 富老板不是在经营"生意"，而是在经营"资产"。每一笔投入都在问：这能创造复利吗？

**第二点，系统思维** — 他们建立的是可以"自动运转"的系统，而不是事必躬亲的作坊。

**第三点，杠杆思维** — 用别人的时间、别人的钱、别人的资源来放大自己的价值。

**One more thing...** 富老板和穷老板最大的区别，不是钱多钱少，而是——**他们购买的是什么？** 穷老板购买的是"消费品"，富老板购买的是"生产资料"。

👉 问你一个问题：你上个月的每一笔支出，有多少是在"投资"，有多少是在"消费"？"#;

const CASHFLOW_REPLY: &str = r#"很好的问题！现金流是商业的血液。

**第一点，区分利润和现金流** — 账面盈利不等于口袋有钱。很多公司"赚着利润死在了账上"。

**第二点，关注回款周期** — 钱从客户口袋到你口袋需要多久？这个周期决定了你需要多少运营资金。

**第三点，建立现金流护城河** — 预付款模式、订阅制、会员制... 这些都是让钱"先进后出"的利器。

**One more thing...** 商业模式的本质，就是一套"现金流结构"。你的钱是先进后出，还是先出后进？这一个差别，就能决定企业的生死。

💡 思考一下：如果你的所有客户明天都要求"货到付款"，你的企业还能活多久？"#;

const MINDSET_REPLY: &str = r#"思维模式是一切的起点！

**第一点，穷老板的"加法思维"** — 觉得多干就能多赚，拼命用体力换钱。

**第二点，富老板的"乘法思维"** — 用杠杆放大价值，一次投入，多次回报。

**第三点，关键转变点** — 从"我怎么赚更多"变成"怎么让系统替我赚钱"。

**One more thing...** 思维的升级往往比技能的升级更难。因为你要先承认——**过去让你成功的方法，可能正是阻碍你更成功的障碍。**

🤔 扪心自问：你现在最引以为豪的能力，有没有可能反而是你的"天花板"？"#;

const ORGANIZATION_REPLY: &str = r#"组织进化是老板解放自己的关键！

**第一点，从"员工"到"合伙人"** — 雇佣关系让人干活，利益共享让人拼命。

**第二点，从"人管人"到"制度管人"** — 好的系统让"庸才"也能稳定产出。

**第三点，从"我做"到"我设计"** — 老板的终极角色是系统架构师，不是超级员工。

**One more thing...** 一个企业最大的风险，就是——**离开老板玩不转**。如果你是公司最大的瓶颈，那公司的天花板就是你自己。

📌 测试一下：如果你消失三个月，公司会发生什么？答案决定了你到底是在"拥有企业"，还是"被企业拥有"。"#;

/// Returned when no keyword group matches the input.
pub const GENERIC_FALLBACK: &str = r#"好问题！让我想想怎么用《富老板》的视角来回答...

**第一点**，这个问题涉及到商业的底层逻辑。

**第二点**，最关键的是要区分"战术层"和"战略层"的思考。

**第三点**，建议你把这个问题拆解成更小的可执行单元。

**One more thing...** 最好的学习方式不是"听懂"，而是**"用出来"**。你今天能把这个思考应用在哪里？

💬 可以试着问我更具体的问题，比如"什么是富老板思维"或"如何管理现金流"！"#;

/// Keyword groups checked in declared order; the first matching group wins.
const KEYWORD_GROUPS: &[(&[&str], &str)] = &[
    (&["富老板", "穷老板", "区别"], RICH_BOSS_REPLY),
    (&["现金", "cash", "流"], CASHFLOW_REPLY),
    (&["思维", "思想", "心态", "mindset"], MINDSET_REPLY),
    (&["组织", "团队", "管理", "员工"], ORGANIZATION_REPLY),
];

/// Selects the canned reply for an input when no credential is available.
///
/// Matching is case-insensitive substring containment against the groups in
/// declared order, falling back to [`GENERIC_FALLBACK`].
pub fn find_fallback_reply(input: &str) -> &'static str {
    let lowered = input.to_lowercase();

    for (keywords, reply) in KEYWORD_GROUPS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return reply;
        }
    }

    GENERIC_FALLBACK
}

/// Greeting content for a fresh log, depending on credential presence.
pub fn greeting(has_credential: bool) -> &'static str {
    if has_credential {
        GREETING
    } else {
        GREETING_NO_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_boss_keywords_select_the_rich_boss_reply() {
        assert_eq!(find_fallback_reply("什么是富老板思维？"), RICH_BOSS_REPLY);
        assert_eq!(find_fallback_reply("穷老板和富老板有什么区别"), RICH_BOSS_REPLY);
    }

    #[test]
    fn first_matching_group_wins_over_later_groups() {
        // Contains both 富老板 (group 1) and 思维 (group 3).
        assert_eq!(find_fallback_reply("富老板的思维"), RICH_BOSS_REPLY);
        // Contains both 现金 (group 2) and 管理 (group 4).
        assert_eq!(find_fallback_reply("如何管理现金？"), CASHFLOW_REPLY);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(find_fallback_reply("CASH is king"), CASHFLOW_REPLY);
        assert_eq!(find_fallback_reply("My MINDSET"), MINDSET_REPLY);
    }

    #[test]
    fn unmatched_input_gets_the_generic_reply() {
        assert_eq!(find_fallback_reply("hello"), GENERIC_FALLBACK);
    }

    #[test]
    fn same_input_always_selects_the_same_reply() {
        let first = find_fallback_reply("团队怎么带？");
        for _ in 0..3 {
            assert_eq!(find_fallback_reply("团队怎么带？"), first);
        }
    }

    #[test]
    fn greeting_depends_on_credential_presence() {
        assert_eq!(greeting(true), GREETING);
        assert_eq!(greeting(false), GREETING_NO_KEY);
    }
}

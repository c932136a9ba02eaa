//! 页面探针 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"读页面 / 操作页面"的能力

use anyhow::Result;
use chromiumoxide::Page;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// 按 XPath 读取页面文本的能力
///
/// 字段提取器只依赖这个 trait，不直接接触 Page，
/// 因此可以用内存中的假页面对定位器链做单元测试。
/// 约定：元素不存在或文本为空时返回 `Ok(None)`；
/// 只有页面本身不可用（CDP 层错误）才返回 `Err`。
pub trait PageText {
    fn text_by_xpath(
        &self,
        xpath: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// 页面探针
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() / 取文本 / 填表 / 点击 / 等待能力
/// - 不认识 OrderTask / OrderRecord
/// - 不处理业务流程
pub struct PageProbe {
    page: Page,
}

impl PageProbe {
    /// 创建新的页面探针
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 点击选中元素后输入文本
    pub async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await?
            .click()
            .await?
            .type_str(text)
            .await?;
        Ok(())
    }

    /// 点击选中元素
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    /// 等待页面完成一次导航
    pub async fn wait_for_navigation(&self) -> Result<()> {
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// 轮询等待 XPath 命中一个非空文本的元素
    ///
    /// 本身不设超时，由调用方在外层用 timeout 收口。
    pub async fn wait_for_xpath(&self, xpath: &str) {
        loop {
            if let Ok(Some(_)) = self.text_by_xpath(xpath).await {
                return;
            }
            sleep(Duration::from_millis(250)).await;
        }
    }
}

impl PageText for PageProbe {
    /// 取 XPath 首个命中元素的可见文本
    async fn text_by_xpath(&self, xpath: &str) -> Result<Option<String>> {
        // 始终返回字符串：节点缺失返回空串，空串在 Rust 侧统一当作未命中
        let js_code = format!(
            r#"
            (() => {{
                const node = document.evaluate(
                    {},
                    document,
                    null,
                    XPathResult.FIRST_ORDERED_NODE_TYPE,
                    null
                ).singleNodeValue;
                if (!node) {{
                    return "";
                }}
                const text = node.innerText !== undefined ? node.innerText : node.textContent;
                return text || "";
            }})()
            "#,
            serde_json::to_string(xpath)?
        );

        let result = self.eval(js_code).await?;
        debug!("xpath {} -> {:?}", xpath, result);

        Ok(result
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from))
    }
}

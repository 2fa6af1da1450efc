use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};

use crate::SentiplotMcp;

const PLOT_PLAN: &str = r"Here is the exact plan you need to follow to create the plot:

Step 1: Fetch posts
Fetch the latest hot posts from the r/Stocks subreddit with the fetch_stocks_subreddit_posts tool.

Step 2: Present thoughts
Share your first impressions of the posts with the user:
- Which stocks are mentioned, and how often?
- How is each stock talked about? Is the tone positive or negative?
- What are the reasons behind that judgement for each stock?
- What else needs a closer look to get a reliable sentiment overview?

Step 3: Fetch detailed post data
For every post from Step 1 that appears to discuss stocks (judging by title and content), call
fetch_single_reddit_post to load the full post: body text, score, upvote ratio, comment count,
and the top comments. Prioritize posts that:
- Name tickers or companies in the title
- Are discussions rather than bare links
- Have substantial engagement (comments and upvotes)
- Look sentiment-rich

Step 4: Extract data
Merge every mention of the same company into one record (AAPL, Apple and Apple Inc. all become
'Apple Inc. (AAPL)'). For each stock derive:
- Symbol: the company name with the ticker in parentheses, e.g. 'Apple Inc. (AAPL)'. The ticker is
  1 to 5 uppercase letters. Every record must use this format.
- Sentiment: how positively the stock was discussed, from -1.00 (very negative) through 0.00
  (neutral) to 1.00 (very positive). Weigh post content, score and upvote ratio.
- Presence: how much of the conversation the stock took up, from 0.00 to 1.00. Weigh both the
  number of mentions and the engagement of the posts that mention it.
NEVER PLACE TWO MARKERS AT THE EXACT SAME POSITION. NUDGE THE SENTIMENT BY ABOUT 0.02 TO KEEP
MARKERS FROM OVERLAPPING.

Step 5: Give the user the data
Before creating the plot, show the user every record:
- Symbol, e.g. 'Tesla Inc. (TSLA)'
- Sentiment between -1.00 and 1.00
- Presence between 0.00 and 1.00
- Summary: a short explanation of the sentiment and presence values (at most 2000 characters)
- Links: the posts that mention the stock, each with a 'url' and the original post 'title'
THE USER MUST SEE THE DATA BEFORE YOU CALL THE create_plot TOOL.

Step 6: Show the plot to the user
Call create_plot with `data` set to the list of records. Each record has:
- 'symbol': company name with ticker in parentheses
- 'sentiment': -1.00 to 1.00 with a precision of at least 0.01
- 'presence': 0.00 to 1.00 with a precision of at least 0.01
- 'summary': the reasoning behind the values
- 'links': a list of objects with 'url' and 'title'
If create_plot reports invalid records, fix every listed field and call it again with the whole batch.
";

#[tool_router(router = tool_router_plan, vis = "pub")]
impl SentiplotMcp {
    #[tool(
        description = "Returns the exact plan for creating a plot with the r/Stocks data. Always call this before create_plot."
    )]
    async fn make_stocks_plot_plan(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text(PLOT_PLAN)]))
    }
}
